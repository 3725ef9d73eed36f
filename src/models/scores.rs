use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Beginner,
    Intermediate,
    Advanced,
    Elite,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Beginner => write!(f, "Beginner"),
            Tier::Intermediate => write!(f, "Intermediate"),
            Tier::Advanced => write!(f, "Advanced"),
            Tier::Elite => write!(f, "Elite"),
        }
    }
}

/// Lower bounds (inclusive) for Elite, Advanced and Intermediate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierThresholds {
    pub elite: f64,
    pub advanced: f64,
    pub intermediate: f64,
}

impl TierThresholds {
    /// Applied to the deterministic base score.
    pub const BASE: TierThresholds = TierThresholds {
        elite: 80.0,
        advanced: 60.0,
        intermediate: 40.0,
    };

    /// Applied to the score after the context multiplier.
    pub const FINAL: TierThresholds = TierThresholds {
        elite: 85.0,
        advanced: 70.0,
        intermediate: 50.0,
    };

    pub fn classify(&self, score: f64) -> Tier {
        if score >= self.elite {
            Tier::Elite
        } else if score >= self.advanced {
            Tier::Advanced
        } else if score >= self.intermediate {
            Tier::Intermediate
        } else {
            Tier::Beginner
        }
    }
}

impl Tier {
    pub fn for_base_score(score: f64) -> Tier {
        TierThresholds::BASE.classify(score)
    }

    pub fn for_final_score(score: f64) -> Tier {
        TierThresholds::FINAL.classify(score)
    }
}

/// Deterministic sub-scores, each in [0, 100], plus their weighted composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseScores {
    pub contribution_score: f64,
    pub pr_quality_score: f64,
    pub impact_score: f64,
    pub code_quality_score: f64,
    pub base_score: f64,
    pub base_tier: Tier,
}
