use crate::models::{
    BaseScores, DetailedAnalysis, ProfileSnapshot, QualitativeResult, FinalRating, RatingProfile,
    RatingStats, Tier,
};
use crate::util::round_to;

/// `final = clamp(round(base * multiplier, 1), 0, 100)`, tiered on the final table.
///
/// Display sections (`profile`, `tech_stack`, `stats`) are filled only when the
/// snapshot is supplied.
pub fn combine(
    scores: &BaseScores,
    qualitative: &QualitativeResult,
    snapshot: Option<&ProfileSnapshot>,
) -> FinalRating {
    let multiplier = qualitative.context_multiplier;
    let final_score = round_to(scores.base_score * multiplier.value(), 1).clamp(0.0, 100.0);

    let notes = &qualitative.notes;
    FinalRating {
        contribution_score: scores.contribution_score,
        pr_quality_score: scores.pr_quality_score,
        impact_score: scores.impact_score,
        code_quality_score: scores.code_quality_score,
        base_score: scores.base_score,
        base_tier: scores.base_tier,
        context_multiplier: multiplier,
        final_score,
        tier: Tier::for_final_score(final_score),
        strengths: qualitative.strengths.clone(),
        weaknesses: qualitative.weaknesses.clone(),
        detailed_analysis: DetailedAnalysis {
            contribution_analysis: notes.contribution_notes.clone(),
            pr_analysis: notes.pr_quality_notes.clone(),
            impact_analysis: notes.impact_notes.clone(),
            code_quality_analysis: notes.code_quality_notes.clone(),
        },
        summary: qualitative.summary.clone(),
        profile: snapshot.map(rating_profile),
        tech_stack: snapshot.map(|s| s.repos_summary.top_languages.clone()),
        stats: snapshot.map(rating_stats),
    }
}

fn rating_profile(snapshot: &ProfileSnapshot) -> RatingProfile {
    let profile = &snapshot.profile;
    RatingProfile {
        username: snapshot.username.clone(),
        name: profile.name.clone(),
        avatar_url: Some(profile.avatar_url.clone()).filter(|url| !url.is_empty()),
        bio: profile.bio.clone(),
        followers: profile.followers,
        public_repos: profile.public_repos,
    }
}

fn rating_stats(snapshot: &ProfileSnapshot) -> RatingStats {
    let repos = &snapshot.repos_summary;
    let prs = &snapshot.pull_requests;
    RatingStats {
        total_stars: repos.total_stars,
        total_forks: repos.total_forks,
        total_repos: repos.total,
        original_repos: repos.original,
        total_commits: snapshot.activity.total_commits_year,
        total_prs: prs.total,
        merged_prs: prs.merged,
        merge_rate: prs.merge_rate,
        reviews_given: prs.reviews_given,
        followers: snapshot.profile.followers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{fixtures, ContextMultiplier};

    fn scores(base_score: f64) -> BaseScores {
        BaseScores {
            contribution_score: 70.0,
            pr_quality_score: 70.0,
            impact_score: 70.0,
            code_quality_score: 70.0,
            base_score,
            base_tier: Tier::for_base_score(base_score),
        }
    }

    fn with_multiplier(value: f64) -> QualitativeResult {
        QualitativeResult {
            context_multiplier: ContextMultiplier::new(value).unwrap(),
            ..QualitativeResult::default()
        }
    }

    #[test]
    fn test_neutral_multiplier_keeps_base() {
        let rating = combine(&scores(72.4), &QualitativeResult::default(), None);
        assert_eq!(rating.final_score, 72.4);
        assert_eq!(rating.tier, Tier::Advanced);
        assert!(rating.profile.is_none());
        assert!(rating.stats.is_none());
    }

    #[test]
    fn test_final_score_is_clamped() {
        let rating = combine(&scores(95.0), &with_multiplier(1.2), None);
        assert_eq!(rating.final_score, 100.0);
        assert_eq!(rating.tier, Tier::Elite);
    }

    #[test]
    fn test_final_table_differs_from_base() {
        let rating = combine(&scores(82.0), &QualitativeResult::default(), None);
        assert_eq!(rating.base_tier, Tier::Elite);
        assert_eq!(rating.tier, Tier::Advanced);

        let lifted = combine(&scores(77.3), &with_multiplier(1.1), None);
        assert_eq!(lifted.final_score, 85.0);
        assert_eq!(lifted.tier, Tier::Elite);

        let short = combine(&scores(84.9), &QualitativeResult::default(), None);
        assert_eq!(short.tier, Tier::Advanced);
    }

    #[test]
    fn test_snapshot_fills_display_sections() {
        let snapshot = fixtures::snapshot();
        let mut qualitative = with_multiplier(0.9);
        qualitative.notes.impact_notes = "Wide reach.".to_string();
        qualitative.strengths = vec!["Reviews".to_string()];

        let rating = combine(&scores(60.0), &qualitative, Some(&snapshot));
        assert_eq!(rating.final_score, 54.0);
        assert_eq!(rating.tier, Tier::Intermediate);
        assert_eq!(rating.detailed_analysis.impact_analysis, "Wide reach.");
        assert_eq!(rating.strengths, vec!["Reviews".to_string()]);

        let profile = rating.profile.unwrap();
        assert_eq!(profile.username, "ada");
        assert_eq!(profile.followers, 120);
        assert_eq!(rating.tech_stack.unwrap()[0], ("Rust".to_string(), 2));

        let stats = rating.stats.unwrap();
        assert_eq!(stats.total_commits, 400);
        assert_eq!(stats.merged_prs, 30);
        assert_eq!(stats.total_repos, 3);
    }

    #[test]
    fn test_json_omits_missing_sections() {
        let rating = combine(&scores(50.0), &QualitativeResult::default(), None);
        let json = serde_json::to_value(&rating).unwrap();
        assert!(json.get("profile").is_none());
        assert_eq!(json["context_multiplier"], 1.0);
        assert_eq!(json["tier"], "Intermediate");
    }
}
