//! Offline stand-in for the qualitative model.
//!
//! The output depends only on the snapshot and scores, so repeated runs over
//! the same input are identical.

use crate::models::{
    BaseScores, ContextMultiplier, ProfileSnapshot, QualitativeNotes, QualitativeResult,
};
use crate::util::round_to;

const MANY_REVIEWS: u64 = 10;
const MENTOR_REVIEWS: u64 = 5;
const EMPLOYER_BONUS: f64 = 0.05;

fn multiplier(snapshot: &ProfileSnapshot) -> f64 {
    let mut multiplier = 1.0;
    if snapshot.pull_requests.reviews_given > MANY_REVIEWS {
        multiplier = 1.1;
    }
    if snapshot.profile.employer().is_some() {
        multiplier = (multiplier + EMPLOYER_BONUS).min(ContextMultiplier::MAX);
    }
    round_to(multiplier, 2)
}

pub fn mock_qualitative(snapshot: &ProfileSnapshot, scores: &BaseScores) -> QualitativeResult {
    let username = &snapshot.username;
    let repos = &snapshot.repos_summary;
    let reviews = snapshot.pull_requests.reviews_given;
    let language_count = repos.languages.len();
    let multiplier = multiplier(snapshot);

    let notes = QualitativeNotes {
        contribution_notes: format!(
            "{} shows {} contribution patterns.",
            username,
            if scores.contribution_score > 50.0 { "strong" } else { "moderate" }
        ),
        pr_quality_notes: format!(
            "Review ratio of {} indicates {}.",
            snapshot.pull_requests.review_to_pr_ratio,
            if reviews > MENTOR_REVIEWS {
                "mentorship behavior"
            } else {
                "growing collaboration"
            }
        ),
        impact_notes: format!(
            "Community reach is {}.",
            if repos.total_stars > 100 { "significant" } else { "developing" }
        ),
        code_quality_notes: format!("Works across {} languages.", language_count),
    };

    QualitativeResult {
        context_multiplier: ContextMultiplier::clamped(multiplier),
        notes,
        strengths: vec![
            format!("Active contributor with {} original repos", repos.original),
            format!("Given {} code reviews to other developers", reviews),
            format!("Uses {} different programming languages", language_count),
        ],
        weaknesses: vec![
            "Could increase PR-to-issue linkage for traceability".to_string(),
            "Consider contributing to more multi-contributor projects".to_string(),
        ],
        summary: format!(
            "{} is a {}-level developer with solid fundamentals. The qualitative signals {} the base score assessment.",
            username,
            scores.base_tier.to_string().to_lowercase(),
            if multiplier > 1.0 { "enhance" } else { "support" }
        ),
    }
}
