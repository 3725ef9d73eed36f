use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::{GitHubUser, Repository};

/// Everything gathered for one username in one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub username: String,
    pub profile: ProfileInfo,
    pub repos: Vec<RepoSummary>,
    pub repos_summary: RepoStats,
    pub pull_requests: PullRequestStats,
    pub activity: CommitActivity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileInfo {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub followers: u32,
    pub following: u32,
    pub public_repos: u32,
    pub created_at: DateTime<Utc>,
    pub avatar_url: String,
}

impl From<&GitHubUser> for ProfileInfo {
    fn from(user: &GitHubUser) -> Self {
        Self {
            name: user.name.clone(),
            bio: user.bio.clone(),
            company: user.company.clone(),
            location: user.location.clone(),
            followers: user.followers,
            following: user.following,
            public_repos: user.public_repos,
            created_at: user.created_at,
            avatar_url: user.avatar_url.clone(),
        }
    }
}

impl ProfileInfo {
    /// Company with surrounding whitespace removed, if one is stated at all.
    pub fn employer(&self) -> Option<&str> {
        self.company
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub stars: u32,
    pub forks: u32,
    pub language: Option<String>,
    pub description: Option<String>,
    pub is_fork: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub size: u64,
    pub open_issues: u32,
    pub watchers: u32,
    pub topics: BTreeSet<String>,
}

impl From<Repository> for RepoSummary {
    fn from(repo: Repository) -> Self {
        Self {
            name: repo.name,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            language: repo.language,
            description: repo.description,
            is_fork: repo.fork,
            created_at: repo.created_at,
            updated_at: repo.updated_at,
            size: repo.size,
            open_issues: repo.open_issues_count,
            watchers: repo.watchers_count,
            topics: repo.topics.into_iter().collect(),
        }
    }
}

impl RepoSummary {
    /// A description or at least one topic counts as basic documentation.
    pub fn is_documented(&self) -> bool {
        self.description
            .as_deref()
            .map(|d| !d.trim().is_empty())
            .unwrap_or(false)
            || !self.topics.is_empty()
    }
}

/// Derived aggregate over `ProfileSnapshot::repos`.
///
/// The quality fields (`readme_count` .. `sample_size`, `complex_repos`,
/// `documented_repos`, `avg_contributors_per_repo`) are computed only over the
/// most-starred sample, not over every repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepoStats {
    pub total: u32,
    pub original: u32,
    pub forked: u32,
    pub code_repos: u32,
    pub doc_repos: u32,
    pub total_stars: u64,
    pub total_forks: u64,
    pub languages: BTreeMap<String, u32>,
    pub top_languages: Vec<(String, u32)>,
    pub complex_repos: u32,
    pub documented_repos: u32,
    pub avg_contributors_per_repo: f64,
    pub readme_count: u32,
    pub license_count: u32,
    pub tests_count: u32,
    pub ci_cd_count: u32,
    pub sample_size: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PullRequestStats {
    pub merged: u64,
    pub rejected: u64,
    pub open: u64,
    pub total: u64,
    /// Percentage, 0-100.
    pub merge_rate: f64,
    pub reviews_given: u64,
    pub prs_with_issue_links: u64,
    pub review_to_pr_ratio: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommitActivity {
    pub total_commits_year: u64,
    /// Anti-gaming count: trivial commits weigh half, extrapolated to the full year.
    pub quality_commits_year: f64,
    pub trivial_commit_ratio: f64,
    pub monthly_distribution: BTreeMap<String, u32>,
    pub active_months: u32,
    pub max_possible_months: u32,
    pub consistency_index: f64,
    pub avg_commits_per_month: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CiProvider {
    GithubActions,
    Travis,
    Jenkins,
    Circleci,
    Azure,
    Gitlab,
}

/// Presence probes for one sampled repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityIndicators {
    pub has_readme: bool,
    pub readme_length: u64,
    pub has_license: bool,
    pub has_tests: bool,
    pub has_ci_cd: bool,
    pub ci_cd_type: Option<CiProvider>,
    pub has_gitignore: bool,
}
