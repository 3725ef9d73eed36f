pub mod provider;
pub mod openrouter;
pub mod prompts;
pub mod parser;
pub mod retry;
pub mod mock;
pub mod analyzer;

pub use provider::LLMProvider;
pub use openrouter::OpenRouterProvider;
pub use parser::{parse_qualitative_response, MalformedReason, ParsedResponse};
pub use retry::{RetryPolicy, RetryState};
pub use analyzer::QualitativeAnalyzer;
