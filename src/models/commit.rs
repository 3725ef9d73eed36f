use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitSearchPage {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<CommitSearchItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitSearchItem {
    #[serde(default)]
    pub sha: String,
    pub commit: CommitDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetails {
    #[serde(default)]
    pub message: String,
    pub author: Option<CommitAuthor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub name: Option<String>,
    pub email: Option<String>,
    /// Kept in the author's own offset so month bucketing follows their calendar.
    pub date: Option<DateTime<FixedOffset>>,
}

impl CommitSearchItem {
    pub fn message(&self) -> &str {
        &self.commit.message
    }

    pub fn authored_at(&self) -> Option<DateTime<FixedOffset>> {
        self.commit.author.as_ref().and_then(|a| a.date)
    }
}
