use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    #[error("Rate limit exceeded, retry after {0} seconds")]
    RateLimited(u64),

    #[error("LLM API error: {0}")]
    LLMApi(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::RateLimited(_) | Error::Network(_) | Error::LLMApi(_))
    }

    /// The only error a caller should surface as "not found"; everything else is a generic failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::UserNotFound(_))
    }
}

/// Failure of a best-effort enrichment call.
///
/// These never leave the aggregator: each call site replaces the failure with
/// its own documented default (partial commit pages, contributor count 1,
/// all-false quality indicators).
#[derive(Error, Debug)]
pub enum RecoverableError {
    #[error("rate limited by upstream (status {status})")]
    RateLimited { status: u16 },

    #[error("search pagination exhausted")]
    PaginationExhausted,

    #[error("unexpected upstream status {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("undecodable response: {0}")]
    Decode(String),
}

impl RecoverableError {
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        match status.as_u16() {
            403 | 429 => RecoverableError::RateLimited {
                status: status.as_u16(),
            },
            422 => RecoverableError::PaginationExhausted,
            other => RecoverableError::Status(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            RecoverableError::from_status(StatusCode::FORBIDDEN),
            RecoverableError::RateLimited { status: 403 }
        ));
        assert!(matches!(
            RecoverableError::from_status(StatusCode::UNPROCESSABLE_ENTITY),
            RecoverableError::PaginationExhausted
        ));
        assert!(matches!(
            RecoverableError::from_status(StatusCode::BAD_GATEWAY),
            RecoverableError::Status(502)
        ));
    }

    #[test]
    fn test_only_transport_errors_are_retryable() {
        assert!(Error::LLMApi("timeout".into()).is_retryable());
        assert!(Error::RateLimited(30).is_retryable());
        assert!(!Error::Config("bad model".into()).is_retryable());
        assert!(!Error::UserNotFound("ghost".into()).is_retryable());
        assert!(!Error::GitHubApi("500".into()).is_retryable());
    }

    #[test]
    fn test_not_found_is_the_only_user_facing_error() {
        assert!(Error::UserNotFound("ghost".into()).is_not_found());
        assert!(!Error::GitHubApi("boom".into()).is_not_found());
        assert_eq!(
            Error::UserNotFound("ghost".into()).to_string(),
            "User 'ghost' not found"
        );
    }
}
