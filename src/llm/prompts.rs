use std::fmt::Write;

use chrono::SecondsFormat;

use crate::models::{BaseScores, ProfileSnapshot};

const NOT_AVAILABLE: &str = "N/A";

const RESPONSE_FORMAT: &str = r#"## Response Format

Return ONLY valid JSON with this exact structure:
{"context_multiplier": 1.0, "qualitative_analysis": {"contribution_notes": "text", "pr_quality_notes": "text", "impact_notes": "text", "code_quality_notes": "text"}, "strengths": ["strength1", "strength2", "strength3"], "weaknesses": ["weakness1", "weakness2"], "summary": "2-3 sentence executive summary"}

IMPORTANT:
- context_multiplier MUST be between 0.8 and 1.2
- Use 1.0 if neutral, >1.0 if qualitative signals are positive, <1.0 if concerning
- Keep notes concise (1-2 sentences each)
- Provide exactly 3 strengths and 2 weaknesses
"#;

const ANALYSIS_TASK: &str = r#"## Your Analysis Task

Analyze the SOFT SIGNALS:
1. **Activity Consistency**: Note if low active months is due to a **new account** (check Active Months denominator). Do NOT penalize new accounts for low total months if consistency is high (e.g. 2/2).
2. Does the bio/company suggest professional experience?
3. Is there evidence of mentorship (high review-to-PR ratio)?
4. Are they working on complex, multi-contributor projects?
5. Do their PRs follow good practices (linked to issues)?
6. Is there diversity in their language usage?
"#;

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_AVAILABLE)
}

/// Render the single prompt sent to the qualitative model.
pub fn qualitative_prompt(snapshot: &ProfileSnapshot, scores: &BaseScores) -> String {
    let profile = &snapshot.profile;
    let repos = &snapshot.repos_summary;
    let prs = &snapshot.pull_requests;
    let activity = &snapshot.activity;
    let top_languages = serde_json::to_string(&repos.top_languages).unwrap_or_default();

    let mut prompt = String::from(
        "You are a senior developer evaluating a GitHub profile. I have already calculated the BASE SCORES using a deterministic formula. Your job is to:\n\n\
         1. Analyze the QUALITATIVE aspects that numbers can't capture.\n\
         2. Provide a CONTEXT MULTIPLIER (0.8 to 1.2) to adjust the final score based on your analysis.\n\n",
    );

    // Writing into a String cannot fail.
    let _ = write!(
        prompt,
        "## Pre-Calculated Base Scores (Deterministic)\n\
         - Contribution Score: {}/100\n\
         - PR Quality Score: {}/100\n\
         - Impact Score: {}/100\n\
         - Code Quality Score: {}/100\n\
         - **Base Score: {}/100**\n\
         - **Base Tier: {}**\n\n",
        scores.contribution_score,
        scores.pr_quality_score,
        scores.impact_score,
        scores.code_quality_score,
        scores.base_score,
        scores.base_tier,
    );

    let _ = write!(
        prompt,
        "## Raw GitHub Data for Qualitative Analysis\n\n\
         ### Developer Profile\n\
         - Username: {}\n\
         - Name: {}\n\
         - Bio: {}\n\
         - Company: {}\n\
         - Location: {}\n\
         - Account Created: {}\n\
         - Followers: {}\n\
         - Following: {}\n\n",
        snapshot.username,
        or_na(profile.name.as_deref()),
        or_na(profile.bio.as_deref()),
        or_na(profile.company.as_deref()),
        or_na(profile.location.as_deref()),
        profile.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        profile.followers,
        profile.following,
    );

    let _ = write!(
        prompt,
        "### Repository Statistics\n\
         - Total Repositories: {}\n\
         - Original Repos: {}\n\
         - Forked Repos: {}\n\
         - Total Stars Earned: {}\n\
         - Total Forks by Others: {}\n\
         - Top Languages: {}\n\
         - Complex Repos (50+ contributors): {}\n\
         - Documented Repos: {}\n\
         - Avg Contributors/Repo: {}\n\n",
        repos.total,
        repos.original,
        repos.forked,
        repos.total_stars,
        repos.total_forks,
        top_languages,
        repos.complex_repos,
        repos.documented_repos,
        repos.avg_contributors_per_repo,
    );

    let _ = write!(
        prompt,
        "### Pull Request Statistics\n\
         - Merged PRs: {}\n\
         - Rejected/Closed PRs: {}\n\
         - Open PRs: {}\n\
         - Total PRs: {}\n\
         - Merge Rate: {}%\n\
         - **Reviews Given (Seniority Indicator)**: {}\n\
         - **PRs Linked to Issues**: {}\n\
         - **Review-to-PR Ratio**: {}\n\n",
        prs.merged,
        prs.rejected,
        prs.open,
        prs.total,
        prs.merge_rate,
        prs.reviews_given,
        prs.prs_with_issue_links,
        prs.review_to_pr_ratio,
    );

    let _ = write!(
        prompt,
        "### Activity Metrics (Last 12 Months)\n\
         - Total Commits: {}\n\
         - Active Months: {}/{} (relative to account age)\n\
         - Consistency Index: {}%\n\
         - Avg Commits/Month: {}\n\n",
        activity.total_commits_year,
        activity.active_months,
        activity.max_possible_months,
        activity.consistency_index,
        activity.avg_commits_per_month,
    );

    prompt.push_str(ANALYSIS_TASK);
    prompt.push('\n');
    prompt.push_str(RESPONSE_FORMAT);
    prompt
}
