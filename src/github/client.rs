use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{header, Client, Response, StatusCode};

use crate::config::Config;
use crate::error::{Error, RecoverableError, Result};
use crate::github::activity::{summarize_activity, window_start};
use crate::github::paginator::{last_page_from_link, Paginator};
use crate::github::quality::{detect_quality, has_github_dir};
use crate::github::rate_limit::RateLimitStatus;
use crate::models::{
    CommitActivity, CommitSearchItem, CommitSearchPage, ContentEntry, GitHubUser,
    PullRequestStats, QualityIndicators, Repository, SearchCount,
};
use crate::util::{ratio, round_to};

const REPOS_PER_PAGE: u32 = 100;
const COMMITS_PER_PAGE: u32 = 100;
const COMMIT_SEARCH_ACCEPT: &str = "application/vnd.github.cloak-preview+json";
const MAX_LOGIN_LEN: usize = 39;

pub struct GitHubClient {
    client: Client,
    base_url: String,
}

/// Everything the commit search yielded before it finished or was cut short.
#[derive(Debug, Default)]
pub struct CommitHarvest {
    pub items: Vec<CommitSearchItem>,
    pub reported_total: Option<u64>,
    pub stopped_by: Option<RecoverableError>,
}

impl GitHubClient {
    pub fn new(token: Option<&str>, base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        match token {
            Some(token) => {
                headers.insert(
                    header::AUTHORIZATION,
                    header::HeaderValue::from_str(&format!("Bearer {}", token))?,
                );
            }
            None => tracing::warn!("GITHUB_TOKEN not set, using unauthenticated GitHub requests"),
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("gitrate/0.1"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.github_token.as_deref(),
            &config.github_api_base,
            config.http_timeout(),
        )
    }

    pub async fn get_user(&self, username: &str) -> Result<GitHubUser> {
        check_login(username)?;
        let url = format!("{}/users/{}", self.base_url, username);
        tracing::info!("Fetching user: {}", username);

        let response = self.client.get(&url).send().await?;
        RateLimitStatus::from_headers(response.headers()).observe(&url);

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::UserNotFound(username.to_string()));
        }

        let response = ensure_success(response, &format!("Failed to fetch user {}", username)).await?;
        Ok(response.json().await?)
    }

    /// Repositories owned (not merely collaborated on) by the user, most recently updated first.
    pub async fn get_user_repos(&self, username: &str) -> Result<Vec<Repository>> {
        check_login(username)?;
        let url = format!("{}/users/{}/repos", self.base_url, username);
        tracing::info!("Fetching repositories for: {}", username);

        let repos: Vec<Repository> = Paginator::new(&self.client)
            .fetch_all(&url, &[("type", "owner"), ("sort", "updated")], REPOS_PER_PAGE)
            .await?;

        Ok(repos
            .into_iter()
            .filter(|r| r.owner.login.eq_ignore_ascii_case(username))
            .collect())
    }

    pub async fn get_pull_request_stats(&self, username: &str) -> Result<PullRequestStats> {
        check_login(username)?;
        tracing::info!("Fetching pull request counts for: {}", username);

        let merged_q = format!("author:{} type:pr is:merged", username);
        let rejected_q = format!("author:{} type:pr is:closed is:unmerged", username);
        let open_q = format!("author:{} type:pr is:open", username);
        let reviewed_q = format!("reviewed-by:{} type:pr", username);
        let linked_q = format!("author:{} type:pr linked:issue", username);

        let (merged, rejected, open, reviews_given, prs_with_issue_links) = futures::try_join!(
            self.search_issue_count(&merged_q),
            self.search_issue_count(&rejected_q),
            self.search_issue_count(&open_q),
            self.search_issue_count(&reviewed_q),
            self.search_issue_count(&linked_q),
        )?;

        Ok(pull_request_stats(
            merged,
            rejected,
            open,
            reviews_given,
            prs_with_issue_links,
        ))
    }

    async fn search_issue_count(&self, query: &str) -> Result<u64> {
        let url = format!("{}/search/issues", self.base_url);
        tracing::debug!("Searching issues: {}", query);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("per_page", "1")])
            .send()
            .await?;
        RateLimitStatus::from_headers(response.headers()).observe(&url);

        let response = ensure_success(response, &format!("Issue search '{}' failed", query)).await?;
        let count: SearchCount = response.json().await?;
        Ok(count.total_count)
    }

    /// Trailing-year commit activity. Never fails: a page that cannot be
    /// fetched ends the search and the pages already fetched are summarized.
    pub async fn get_commit_activity(
        &self,
        username: &str,
        account_created_at: Option<DateTime<Utc>>,
        max_pages: u32,
        page_delay: Duration,
    ) -> CommitActivity {
        let now = Utc::now();
        if !is_valid_login(username) {
            tracing::warn!("Skipping commit search for invalid login {:?}", username);
            return summarize_activity(&[], None, account_created_at, now);
        }
        let query = format!("author:{} author-date:>{}", username, window_start(now));
        tracing::info!("Searching commits for: {}", username);

        let harvest = self.harvest_commits(&query, max_pages, page_delay).await;
        if let Some(reason) = &harvest.stopped_by {
            tracing::warn!(
                "Commit search for {} stopped early ({}), using {} fetched commits",
                username,
                reason,
                harvest.items.len()
            );
        }

        summarize_activity(&harvest.items, harvest.reported_total, account_created_at, now)
    }

    async fn harvest_commits(&self, query: &str, max_pages: u32, page_delay: Duration) -> CommitHarvest {
        let mut harvest = CommitHarvest::default();

        for page in 1..=max_pages {
            if page > 1 && !page_delay.is_zero() {
                tokio::time::sleep(page_delay).await;
            }

            match self.fetch_commit_page(query, page).await {
                Ok(result) => {
                    harvest.reported_total = Some(result.total_count);
                    let count = result.items.len();
                    harvest.items.extend(result.items);
                    if count < COMMITS_PER_PAGE as usize {
                        break;
                    }
                }
                Err(e) => {
                    harvest.stopped_by = Some(e);
                    break;
                }
            }
        }

        harvest
    }

    async fn fetch_commit_page(
        &self,
        query: &str,
        page: u32,
    ) -> std::result::Result<CommitSearchPage, RecoverableError> {
        let url = format!("{}/search/commits", self.base_url);
        tracing::debug!("Searching commits: {} (page {})", query, page);

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, COMMIT_SEARCH_ACCEPT)
            .query(&[("q", query), ("sort", "author-date"), ("order", "desc")])
            .query(&[("per_page", COMMITS_PER_PAGE), ("page", page)])
            .send()
            .await?;
        RateLimitStatus::from_headers(response.headers()).observe(&url);

        if !response.status().is_success() {
            return Err(RecoverableError::from_status(response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| RecoverableError::Decode(e.to_string()))
    }

    /// Contributor count, read from the last-page link at one contributor per page.
    pub async fn get_repo_contributor_count(
        &self,
        owner: &str,
        repo: &str,
    ) -> std::result::Result<u32, RecoverableError> {
        let url = format!("{}/repos/{}/{}/contributors", self.base_url, owner, repo);

        let response = self
            .client
            .get(&url)
            .query(&[("per_page", "1"), ("anon", "false")])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(RecoverableError::from_status(response.status()));
        }

        let last_page = response
            .headers()
            .get(header::LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(last_page_from_link);
        if let Some(count) = last_page {
            return Ok(count);
        }

        let contributors: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| RecoverableError::Decode(e.to_string()))?;
        Ok(contributors.len() as u32)
    }

    pub async fn get_repo_quality_indicators(
        &self,
        owner: &str,
        repo: &str,
    ) -> std::result::Result<QualityIndicators, RecoverableError> {
        let root = self.list_contents(owner, repo, "").await?;

        let has_workflows = if has_github_dir(&root) {
            self.list_contents(owner, repo, ".github/workflows")
                .await
                .is_ok()
        } else {
            false
        };

        Ok(detect_quality(&root, has_workflows))
    }

    async fn list_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> std::result::Result<Vec<ContentEntry>, RecoverableError> {
        let url = if path.is_empty() {
            format!("{}/repos/{}/{}/contents", self.base_url, owner, repo)
        } else {
            format!("{}/repos/{}/{}/contents/{}", self.base_url, owner, repo, path)
        };

        let response = self.client.get(&url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(RecoverableError::from_status(response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| RecoverableError::Decode(e.to_string()))
    }
}

/// Whether `username` could be a GitHub login: 1 to 39 ASCII alphanumerics or hyphens.
pub fn is_valid_login(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= MAX_LOGIN_LEN
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn check_login(username: &str) -> Result<()> {
    if is_valid_login(username) {
        Ok(())
    } else {
        Err(Error::UserNotFound(username.to_string()))
    }
}

/// Turn a non-2xx response on an essential call into a fatal error.
pub(crate) async fn ensure_success(response: Response, context: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let limit = RateLimitStatus::from_headers(response.headers());
    if matches!(status, StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS) && limit.is_exhausted() {
        return Err(Error::RateLimited(limit.seconds_until_reset_from_now()));
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::GitHubApi(format!("{}: {} - {}", context, status, body)))
}

/// Derive rates from the raw search counts.
pub fn pull_request_stats(
    merged: u64,
    rejected: u64,
    open: u64,
    reviews_given: u64,
    prs_with_issue_links: u64,
) -> PullRequestStats {
    let total = merged + rejected + open;

    PullRequestStats {
        merged,
        rejected,
        open,
        total,
        merge_rate: round_to(ratio(merged as f64 * 100.0, total as f64), 2),
        reviews_given,
        prs_with_issue_links,
        review_to_pr_ratio: round_to(reviews_given as f64 / total.max(1) as f64, 2),
    }
}
