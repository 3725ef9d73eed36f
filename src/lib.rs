pub mod config;
pub mod error;
pub mod util;
pub mod models;
pub mod taxonomy;
pub mod github;
pub mod llm;
pub mod analysis;

pub use config::{AnalyzerConfig, Config, PipelineConfig};
pub use error::{Error, RecoverableError, Result};
pub use github::GitHubClient;
pub use llm::{LLMProvider, OpenRouterProvider, QualitativeAnalyzer};
pub use analysis::{combine, DataAggregator, RatingPipeline, ScoringEngine};
