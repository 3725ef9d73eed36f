//! Hand-built snapshots shared by unit tests.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{TimeZone, Utc};

use super::*;

pub fn profile() -> ProfileInfo {
    ProfileInfo {
        name: Some("Ada Example".to_string()),
        bio: Some("Compilers and coffee".to_string()),
        company: None,
        location: Some("Berlin".to_string()),
        followers: 120,
        following: 15,
        public_repos: 3,
        created_at: Utc.with_ymd_and_hms(2016, 3, 1, 0, 0, 0).unwrap(),
        avatar_url: "https://avatars.example/ada.png".to_string(),
    }
}

pub fn repo(name: &str, stars: u32, language: Option<&str>) -> RepoSummary {
    RepoSummary {
        name: name.to_string(),
        stars,
        forks: stars / 10,
        language: language.map(str::to_string),
        description: None,
        is_fork: false,
        created_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        size: 512,
        open_issues: 0,
        watchers: stars,
        topics: BTreeSet::new(),
    }
}

/// A mid-career developer: a few starred repos, a steady PR record.
pub fn snapshot() -> ProfileSnapshot {
    let mut languages = BTreeMap::new();
    languages.insert("Rust".to_string(), 2);
    languages.insert("Python".to_string(), 1);

    ProfileSnapshot {
        username: "ada".to_string(),
        profile: profile(),
        repos: vec![
            repo("parser", 240, Some("Rust")),
            repo("cache", 60, Some("Rust")),
            repo("scripts", 0, Some("Python")),
        ],
        repos_summary: RepoStats {
            total: 3,
            original: 3,
            forked: 0,
            code_repos: 3,
            doc_repos: 0,
            total_stars: 300,
            total_forks: 30,
            languages,
            top_languages: vec![("Rust".to_string(), 2), ("Python".to_string(), 1)],
            complex_repos: 0,
            documented_repos: 1,
            avg_contributors_per_repo: 2.3,
            readme_count: 3,
            license_count: 2,
            tests_count: 1,
            ci_cd_count: 1,
            sample_size: 3,
        },
        pull_requests: PullRequestStats {
            merged: 30,
            rejected: 5,
            open: 5,
            total: 40,
            merge_rate: 75.0,
            reviews_given: 12,
            prs_with_issue_links: 10,
            review_to_pr_ratio: 0.3,
        },
        activity: CommitActivity {
            total_commits_year: 400,
            quality_commits_year: 300.0,
            trivial_commit_ratio: 0.5,
            monthly_distribution: BTreeMap::new(),
            active_months: 9,
            max_possible_months: 12,
            consistency_index: 75.0,
            avg_commits_per_month: 33.33,
        },
    }
}

/// A freshly created account with nothing on it.
pub fn empty_snapshot() -> ProfileSnapshot {
    ProfileSnapshot {
        username: "newcomer".to_string(),
        profile: ProfileInfo {
            name: None,
            bio: None,
            company: None,
            location: None,
            followers: 0,
            following: 0,
            public_repos: 0,
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
            avatar_url: String::new(),
        },
        repos: Vec::new(),
        repos_summary: RepoStats::default(),
        pull_requests: PullRequestStats::default(),
        activity: CommitActivity {
            max_possible_months: 1,
            ..CommitActivity::default()
        },
    }
}
