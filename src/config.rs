use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::llm::retry::RetryPolicy;

pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_OPENROUTER_MODEL: &str = "google/gemini-2.0-flash-001";

/// Process-wide settings, read once at startup and passed by reference afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub github_api_base: String,
    pub openrouter_api_key: Option<String>,
    pub openrouter_model: String,
    pub openrouter_base_url: String,
    pub mock_mode: bool,
    pub http_timeout_secs: u64,
    pub commit_search_max_pages: u32,
    pub llm_max_attempts: u32,
    pub llm_retry_delay_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let github_token = non_empty("GITHUB_TOKEN");
        let openrouter_api_key = non_empty("OPENROUTER_API_KEY");

        let github_api_base = non_empty("GITHUB_API_BASE")
            .unwrap_or_else(|| DEFAULT_GITHUB_API_BASE.to_string());
        let openrouter_model = non_empty("OPENROUTER_MODEL")
            .unwrap_or_else(|| DEFAULT_OPENROUTER_MODEL.to_string());
        let openrouter_base_url = non_empty("OPENROUTER_BASE_URL")
            .unwrap_or_else(|| DEFAULT_OPENROUTER_BASE_URL.to_string());

        let mock_mode = lookup("MOCK_MODE")
            .map(|v| v.trim().to_lowercase() == "true")
            .unwrap_or(false);

        Ok(Self {
            github_token,
            github_api_base: github_api_base.trim_end_matches('/').to_string(),
            openrouter_api_key,
            openrouter_model,
            openrouter_base_url: openrouter_base_url.trim_end_matches('/').to_string(),
            mock_mode,
            http_timeout_secs: parse_or("HTTP_TIMEOUT_SECS", non_empty("HTTP_TIMEOUT_SECS"), 30)?,
            commit_search_max_pages: parse_or(
                "COMMIT_SEARCH_MAX_PAGES",
                non_empty("COMMIT_SEARCH_MAX_PAGES"),
                5,
            )?,
            llm_max_attempts: parse_or("LLM_MAX_ATTEMPTS", non_empty("LLM_MAX_ATTEMPTS"), 3)?,
            llm_retry_delay_secs: parse_or(
                "LLM_RETRY_DELAY_SECS",
                non_empty("LLM_RETRY_DELAY_SECS"),
                5,
            )?,
        })
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            github_api_base: DEFAULT_GITHUB_API_BASE.to_string(),
            openrouter_api_key: None,
            openrouter_model: DEFAULT_OPENROUTER_MODEL.to_string(),
            openrouter_base_url: DEFAULT_OPENROUTER_BASE_URL.to_string(),
            mock_mode: false,
            http_timeout_secs: 30,
            commit_search_max_pages: 5,
            llm_max_attempts: 3,
            llm_retry_delay_secs: 5,
        }
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{} has an invalid value: {}", key, value))),
    }
}

/// Knobs for the aggregation stage.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Number of most-starred repositories probed for contributors and quality indicators.
    pub sample_size: usize,
    pub commit_search_max_pages: u32,
    /// Pause between commit search pages (secondary rate limits).
    pub commit_page_delay: Duration,
    /// Contributor count at which a repository counts as complex.
    pub complex_repo_threshold: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_size: 5,
            commit_search_max_pages: 5,
            commit_page_delay: Duration::from_millis(500),
            complex_repo_threshold: 50,
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            commit_search_max_pages: config.commit_search_max_pages.max(1),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub mock_mode: bool,
    pub retry: RetryPolicy,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            mock_mode: false,
            retry: RetryPolicy::default(),
        }
    }
}

impl From<&Config> for AnalyzerConfig {
    fn from(config: &Config) -> Self {
        Self {
            mock_mode: config.mock_mode,
            retry: RetryPolicy::new(
                config.llm_max_attempts,
                Duration::from_secs(config.llm_retry_delay_secs),
            ),
        }
    }
}
