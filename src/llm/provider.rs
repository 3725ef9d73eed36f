use async_trait::async_trait;

use crate::error::Result;

/// A chat model that answers one prompt with one block of text.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
    fn name(&self) -> &str;
}
