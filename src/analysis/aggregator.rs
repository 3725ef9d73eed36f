use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::github::GitHubClient;
use crate::models::{ProfileInfo, ProfileSnapshot, QualityIndicators, RepoStats, RepoSummary};
use crate::taxonomy::is_code_language;
use crate::util::round_to;

const TOP_LANGUAGES: usize = 5;

/// Results of the best-effort probes for one sampled repository.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepoProbe {
    pub contributors: u32,
    pub quality: QualityIndicators,
}

pub struct DataAggregator {
    github: Arc<GitHubClient>,
    config: PipelineConfig,
}

impl DataAggregator {
    pub fn new(github: Arc<GitHubClient>, config: PipelineConfig) -> Self {
        Self { github, config }
    }

    /// Collect everything scoring needs for one user.
    ///
    /// Only a missing user or a failed essential call (profile, repositories,
    /// pull request counts) is an error; commit activity and repository probes
    /// degrade to partial or default data.
    pub async fn aggregate(&self, username: &str) -> Result<ProfileSnapshot> {
        let user = self.github.get_user(username).await?;

        let repos = self.github.get_user_repos(username).await?;
        tracing::info!("Found {} repositories for {}", repos.len(), username);

        let pull_requests = self.github.get_pull_request_stats(username).await?;

        let activity = self
            .github
            .get_commit_activity(
                username,
                Some(user.created_at),
                self.config.commit_search_max_pages,
                self.config.commit_page_delay,
            )
            .await;

        let repos: Vec<RepoSummary> = repos.into_iter().map(RepoSummary::from).collect();

        let sample = top_starred(&repos, self.config.sample_size);
        tracing::info!("Probing {} most-starred repositories", sample.len());
        let probes = join_all(sample.iter().map(|repo| self.probe(username, &repo.name))).await;
        let sampled: Vec<(&RepoSummary, RepoProbe)> = sample.into_iter().zip(probes).collect();

        let repos_summary = summarize_repos(&repos, &sampled, self.config.complex_repo_threshold);

        Ok(ProfileSnapshot {
            username: username.to_string(),
            profile: ProfileInfo::from(&user),
            repos,
            repos_summary,
            pull_requests,
            activity,
        })
    }

    async fn probe(&self, owner: &str, repo: &str) -> RepoProbe {
        let (contributors, quality) = futures::join!(
            self.github.get_repo_contributor_count(owner, repo),
            self.github.get_repo_quality_indicators(owner, repo),
        );

        let contributors = contributors.unwrap_or_else(|e| {
            tracing::warn!("Contributor count for {}/{} unavailable ({}), assuming 1", owner, repo, e);
            1
        });
        let quality = quality.unwrap_or_else(|e| {
            tracing::warn!("Quality probe for {}/{} failed ({}), assuming none", owner, repo, e);
            QualityIndicators::default()
        });

        RepoProbe {
            contributors,
            quality,
        }
    }
}

/// The `n` most-starred repositories; equal star counts keep listing order.
pub fn top_starred(repos: &[RepoSummary], n: usize) -> Vec<&RepoSummary> {
    let mut sorted: Vec<&RepoSummary> = repos.iter().collect();
    sorted.sort_by(|a, b| b.stars.cmp(&a.stars));
    sorted.truncate(n);
    sorted
}

pub fn summarize_repos(
    repos: &[RepoSummary],
    sampled: &[(&RepoSummary, RepoProbe)],
    complex_threshold: u32,
) -> RepoStats {
    let mut stats = RepoStats {
        total: repos.len() as u32,
        ..RepoStats::default()
    };

    let mut first_seen: Vec<String> = Vec::new();
    for repo in repos {
        stats.total_stars += u64::from(repo.stars);
        stats.total_forks += u64::from(repo.forks);
        if repo.is_fork {
            stats.forked += 1;
        } else {
            stats.original += 1;
        }

        match repo.language.as_deref() {
            Some(language) => {
                let count = stats.languages.entry(language.to_string()).or_insert(0);
                if *count == 0 {
                    first_seen.push(language.to_string());
                }
                *count += 1;

                if is_code_language(language) {
                    stats.code_repos += 1;
                } else {
                    stats.doc_repos += 1;
                }
            }
            None => stats.doc_repos += 1,
        }
    }
    stats.top_languages = top_languages(&stats.languages, first_seen);

    let mut total_contributors = 0u64;
    for (repo, probe) in sampled {
        if repo.is_documented() {
            stats.documented_repos += 1;
        }
        total_contributors += u64::from(probe.contributors);
        if probe.contributors >= complex_threshold {
            stats.complex_repos += 1;
        }

        let q = &probe.quality;
        stats.readme_count += u32::from(q.has_readme);
        stats.license_count += u32::from(q.has_license);
        stats.tests_count += u32::from(q.has_tests);
        stats.ci_cd_count += u32::from(q.has_ci_cd);
    }

    stats.sample_size = sampled.len() as u32;
    stats.avg_contributors_per_repo = round_to(
        total_contributors as f64 / sampled.len().max(1) as f64,
        1,
    );

    stats
}

/// Highest counts first; ties go to the language seen first.
fn top_languages(languages: &BTreeMap<String, u32>, first_seen: Vec<String>) -> Vec<(String, u32)> {
    let mut ranked: Vec<(String, u32)> = first_seen
        .into_iter()
        .map(|lang| {
            let count = languages.get(&lang).copied().unwrap_or(0);
            (lang, count)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(TOP_LANGUAGES);
    ranked
}
