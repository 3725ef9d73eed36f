pub mod client;
pub mod paginator;
pub mod rate_limit;
pub mod activity;
pub mod quality;

#[cfg(test)]
pub(crate) mod test_server;

pub use client::GitHubClient;
pub use paginator::Paginator;
pub use rate_limit::RateLimitStatus;
