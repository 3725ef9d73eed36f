use crate::models::{BaseScores, ProfileSnapshot, Tier};
use crate::util::round_to;

pub struct ScoringEngine {
    weights: ScoreWeights,
}

/// Composite weights; they sum to 1.0.
#[derive(Debug, Clone)]
pub struct ScoreWeights {
    pub contribution_weight: f64,
    pub pr_quality_weight: f64,
    pub impact_weight: f64,
    pub code_quality_weight: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            contribution_weight: 0.30,
            pr_quality_weight: 0.25,
            impact_weight: 0.15,
            code_quality_weight: 0.30,
        }
    }
}

/// Score for developers with no pull requests at all.
const SOLO_PR_SCORE: f64 = 40.0;

fn finish(raw: f64) -> f64 {
    round_to(raw.clamp(0.0, 100.0), 1)
}

/// `min(cap, ln(x + 1) * slope)`, defined at zero.
fn log_term(x: f64, slope: f64, cap: f64) -> f64 {
    ((x.max(0.0) + 1.0).ln() * slope).min(cap)
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self {
            weights: ScoreWeights::default(),
        }
    }

    pub fn with_weights(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn calculate(&self, snapshot: &ProfileSnapshot) -> BaseScores {
        let contribution_score = contribution_score(snapshot);
        let pr_quality_score = pr_quality_score(snapshot);
        let impact_score = impact_score(snapshot);
        let code_quality_score = code_quality_score(snapshot);

        let w = &self.weights;
        let base_score = round_to(
            w.contribution_weight * contribution_score
                + w.pr_quality_weight * pr_quality_score
                + w.impact_weight * impact_score
                + w.code_quality_weight * code_quality_score,
            1,
        );

        tracing::debug!(
            "Base scores for {}: contribution={} pr={} impact={} code={} base={}",
            snapshot.username,
            contribution_score,
            pr_quality_score,
            impact_score,
            code_quality_score,
            base_score
        );

        BaseScores {
            contribution_score,
            pr_quality_score,
            impact_score,
            code_quality_score,
            base_score,
            base_tier: Tier::for_base_score(base_score),
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Activity volume and consistency. Documentation-only repositories count half.
pub fn contribution_score(snapshot: &ProfileSnapshot) -> f64 {
    let repos = &snapshot.repos_summary;
    let activity = &snapshot.activity;

    let quality_commits = activity.quality_commits_year;
    let base = if repos.original > 0 || quality_commits > 0.0 {
        30.0
    } else {
        0.0
    };

    let adjusted_repos = repos.code_repos as f64 + repos.doc_repos as f64 * 0.5;
    let repo_term = (adjusted_repos * 2.0).min(20.0);
    let commit_term = log_term(quality_commits, 6.5, 25.0);
    let consistency_term = activity.consistency_index * 0.15;
    let active_term = (activity.active_months as f64 / activity.max_possible_months.max(1) as f64
        * 10.0)
        .min(10.0);

    finish(base + repo_term + commit_term + consistency_term + active_term)
}

pub fn pr_quality_score(snapshot: &ProfileSnapshot) -> f64 {
    let prs = &snapshot.pull_requests;
    if prs.total == 0 {
        return SOLO_PR_SCORE;
    }

    let total = prs.total as f64;
    let merge_term = prs.merged as f64 / total * 100.0 * 0.35;
    let review_term = (prs.reviews_given as f64 * 3.0).min(30.0);
    let linkage_term = (prs.prs_with_issue_links as f64 / total * 20.0).min(20.0);
    let participation_term = (total * 1.5).min(15.0);

    finish(merge_term + review_term + linkage_term + participation_term)
}

pub fn impact_score(snapshot: &ProfileSnapshot) -> f64 {
    let repos = &snapshot.repos_summary;
    let followers = snapshot.profile.followers as f64;

    let base = if repos.total_stars > 0 || followers > 0.0 {
        25.0
    } else {
        10.0
    };

    let star_term = log_term(repos.total_stars as f64, 8.0, 30.0);
    let fork_term = log_term(repos.total_forks as f64, 6.0, 20.0);
    let follower_term = log_term(followers, 5.0, 15.0);
    let collaboration_term = (repos.avg_contributors_per_repo * 2.0).min(10.0);

    finish(base + star_term + fork_term + follower_term + collaboration_term)
}

/// Diversity, complexity and engineering hygiene. Hygiene ratios are over the sample only.
pub fn code_quality_score(snapshot: &ProfileSnapshot) -> f64 {
    let repos = &snapshot.repos_summary;

    let base = if repos.total > 0 { 20.0 } else { 0.0 };
    let diversity_term = (repos.languages.len() as f64 * 5.0).min(20.0);
    let complexity_term = (repos.complex_repos as f64 * 7.5).min(15.0);

    let sample = repos.sample_size.max(1) as f64;
    let hygiene = |count: u32, cap: f64| (count as f64 / sample * cap).min(cap);

    finish(
        base + diversity_term
            + complexity_term
            + hygiene(repos.readme_count, 15.0)
            + hygiene(repos.tests_count, 15.0)
            + hygiene(repos.ci_cd_count, 10.0)
            + hygiene(repos.license_count, 5.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::client::pull_request_stats;
    use crate::models::fixtures;

    #[test]
    fn test_empty_account() {
        let snapshot = fixtures::empty_snapshot();
        let scores = ScoringEngine::new().calculate(&snapshot);

        assert_eq!(scores.contribution_score, 0.0);
        assert_eq!(scores.pr_quality_score, 40.0);
        assert_eq!(scores.impact_score, 10.0);
        assert_eq!(scores.code_quality_score, 0.0);
        // 0.25 * 40 + 0.15 * 10
        assert_eq!(scores.base_score, 11.5);
        assert_eq!(scores.base_tier, Tier::Beginner);
    }

    #[test]
    fn test_solo_developer_is_not_penalized() {
        let mut snapshot = fixtures::snapshot();
        snapshot.pull_requests = Default::default();
        snapshot.pull_requests.reviews_given = 50;
        assert_eq!(pr_quality_score(&snapshot), 40.0);
    }

    #[test]
    fn test_half_merged_pull_requests() {
        let mut snapshot = fixtures::empty_snapshot();
        snapshot.pull_requests.merged = 5;
        snapshot.pull_requests.rejected = 5;
        snapshot.pull_requests.total = 10;
        // 50% * 0.35 + participation min(15, 10 * 1.5)
        assert_eq!(pr_quality_score(&snapshot), 32.5);
    }

    #[test]
    fn test_fully_merged_reviewer() {
        let mut snapshot = fixtures::empty_snapshot();
        snapshot.pull_requests = pull_request_stats(50, 0, 0, 20, 0);
        assert_eq!(snapshot.pull_requests.merge_rate, 100.0);
        // 35 merged + 30 reviews (capped) + 15 participation (capped)
        assert_eq!(pr_quality_score(&snapshot), 80.0);

        snapshot.pull_requests = pull_request_stats(50, 0, 0, 20, 50);
        assert_eq!(pr_quality_score(&snapshot), 100.0);
    }

    #[test]
    fn test_huge_star_counts_hit_the_caps() {
        let mut snapshot = fixtures::empty_snapshot();
        snapshot.repos_summary.total_stars = 10_000;
        snapshot.repos_summary.total_forks = 100_000;
        snapshot.repos_summary.avg_contributors_per_repo = 400.0;
        snapshot.profile.followers = 1_000_000;
        assert_eq!(impact_score(&snapshot), 100.0);
    }

    #[test]
    fn test_contribution_terms() {
        let mut snapshot = fixtures::empty_snapshot();
        snapshot.repos_summary.original = 2;
        snapshot.repos_summary.code_repos = 3;
        snapshot.repos_summary.doc_repos = 2;
        snapshot.activity.quality_commits_year = 0.0;
        snapshot.activity.consistency_index = 50.0;
        snapshot.activity.active_months = 6;
        snapshot.activity.max_possible_months = 12;
        // 30 + min(20, 4 * 2) + 0 + 7.5 + 5
        assert_eq!(contribution_score(&snapshot), 50.5);
    }

    #[test]
    fn test_contribution_never_exceeds_100() {
        let mut snapshot = fixtures::snapshot();
        snapshot.repos_summary.code_repos = 500;
        snapshot.activity.quality_commits_year = 1e9;
        snapshot.activity.consistency_index = 100.0;
        snapshot.activity.active_months = 12;
        assert_eq!(contribution_score(&snapshot), 100.0);
    }

    #[test]
    fn test_code_quality_uses_sample_ratios() {
        let mut snapshot = fixtures::empty_snapshot();
        snapshot.repos_summary.total = 40;
        snapshot.repos_summary.languages.insert("Rust".to_string(), 30);
        snapshot.repos_summary.languages.insert("Go".to_string(), 10);
        snapshot.repos_summary.complex_repos = 1;
        snapshot.repos_summary.sample_size = 5;
        snapshot.repos_summary.readme_count = 5;
        snapshot.repos_summary.tests_count = 1;
        snapshot.repos_summary.ci_cd_count = 0;
        snapshot.repos_summary.license_count = 5;
        // 20 + 10 + 7.5 + 15 + 3 + 0 + 5
        assert_eq!(code_quality_score(&snapshot), 60.5);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let scores = ScoringEngine::new().calculate(&fixtures::snapshot());
        for score in [
            scores.contribution_score,
            scores.pr_quality_score,
            scores.impact_score,
            scores.code_quality_score,
            scores.base_score,
        ] {
            assert!((0.0..=100.0).contains(&score));
        }
        assert_eq!(scores.base_tier, Tier::for_base_score(scores.base_score));
    }
}
