use serde::{Deserialize, Serialize};

use super::analysis::ContextMultiplier;
use super::scores::Tier;

/// The complete rating returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalRating {
    pub contribution_score: f64,
    pub pr_quality_score: f64,
    pub impact_score: f64,
    pub code_quality_score: f64,
    pub base_score: f64,
    /// Tier of `base_score` on the base table; may differ from `tier`.
    pub base_tier: Tier,
    pub context_multiplier: ContextMultiplier,
    pub final_score: f64,
    pub tier: Tier,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub detailed_analysis: DetailedAnalysis,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<RatingProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<Vec<(String, u32)>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<RatingStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailedAnalysis {
    pub contribution_analysis: String,
    pub pr_analysis: String,
    pub impact_analysis: String,
    pub code_quality_analysis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingProfile {
    pub username: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub followers: u32,
    pub public_repos: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingStats {
    pub total_stars: u64,
    pub total_forks: u64,
    pub total_repos: u32,
    pub original_repos: u32,
    pub total_commits: u64,
    pub total_prs: u64,
    pub merged_prs: u64,
    pub merge_rate: f64,
    pub reviews_given: u64,
    pub followers: u32,
}
