use serde::{Deserialize, Serialize};

/// Factor applied to the base score. Construction enforces [0.8, 1.2].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ContextMultiplier(f64);

impl ContextMultiplier {
    pub const MIN: f64 = 0.8;
    pub const MAX: f64 = 1.2;
    pub const NEUTRAL: ContextMultiplier = ContextMultiplier(1.0);

    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && (Self::MIN..=Self::MAX).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Saturating constructor; non-finite input becomes neutral.
    pub fn clamped(value: f64) -> Self {
        if value.is_finite() {
            Self(value.clamp(Self::MIN, Self::MAX))
        } else {
            Self::NEUTRAL
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for ContextMultiplier {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl TryFrom<f64> for ContextMultiplier {
    type Error = String;

    fn try_from(value: f64) -> std::result::Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            format!(
                "context_multiplier must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )
        })
    }
}

impl From<ContextMultiplier> for f64 {
    fn from(m: ContextMultiplier) -> f64 {
        m.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualitativeNotes {
    pub contribution_notes: String,
    pub pr_quality_notes: String,
    pub impact_notes: String,
    pub code_quality_notes: String,
}

/// Qualitative overlay produced by the model or by one of the fallbacks.
///
/// Every field has a default, so a sparse but well-typed response is valid;
/// a wrongly typed field or an out-of-range multiplier is not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualitativeResult {
    pub context_multiplier: ContextMultiplier,
    #[serde(rename = "qualitative_analysis")]
    pub notes: QualitativeNotes,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub summary: String,
}

impl QualitativeResult {
    /// Neutral result carrying only a diagnostic summary.
    pub fn fallback(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Self::default()
        }
    }
}
