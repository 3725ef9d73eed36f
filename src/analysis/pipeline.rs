use std::sync::Arc;

use crate::analysis::aggregator::DataAggregator;
use crate::analysis::combiner::combine;
use crate::analysis::scoring::ScoringEngine;
use crate::config::{AnalyzerConfig, Config, PipelineConfig};
use crate::error::Result;
use crate::github::GitHubClient;
use crate::llm::{LLMProvider, OpenRouterProvider, QualitativeAnalyzer};
use crate::models::{FinalRating, ProfileSnapshot};

/// One rating request end to end: aggregate, score, analyze, combine.
///
/// Holds no per-request state, so one pipeline can serve concurrent requests.
pub struct RatingPipeline {
    aggregator: DataAggregator,
    scoring: ScoringEngine,
    analyzer: QualitativeAnalyzer,
}

impl RatingPipeline {
    pub fn new(config: &Config) -> Result<Self> {
        let github = GitHubClient::from_config(config)?;
        let provider = OpenRouterProvider::from_config(config)?
            .map(|p| Arc::new(p) as Arc<dyn LLMProvider>);

        Ok(Self::with_parts(
            github,
            provider,
            PipelineConfig::from(config),
            AnalyzerConfig::from(config),
        ))
    }

    pub fn with_parts(
        github: GitHubClient,
        provider: Option<Arc<dyn LLMProvider>>,
        pipeline_config: PipelineConfig,
        analyzer_config: AnalyzerConfig,
    ) -> Self {
        Self {
            aggregator: DataAggregator::new(Arc::new(github), pipeline_config),
            scoring: ScoringEngine::new(),
            analyzer: QualitativeAnalyzer::new(provider, analyzer_config),
        }
    }

    /// Rate a developer. Fails only when the user does not exist or an
    /// essential hosting-API call fails.
    pub async fn rate_developer(&self, username: &str) -> Result<FinalRating> {
        tracing::info!("Rating GitHub user: {}", username);

        let snapshot = self.aggregator.aggregate(username).await?;

        let scores = self.scoring.calculate(&snapshot);
        tracing::info!(
            "Base score for {}: {} ({})",
            username,
            scores.base_score,
            scores.base_tier
        );

        let qualitative = self.analyzer.analyze(&snapshot, &scores).await;

        let rating = combine(&scores, &qualitative, Some(&snapshot));
        tracing::info!(
            "Final score for {}: {} ({}), multiplier {}",
            username,
            rating.final_score,
            rating.tier,
            rating.context_multiplier.value()
        );

        Ok(rating)
    }

    /// The aggregated snapshot without scoring, for debugging.
    pub async fn raw_snapshot(&self, username: &str) -> Result<ProfileSnapshot> {
        tracing::info!("Collecting raw snapshot for: {}", username);
        self.aggregator.aggregate(username).await
    }
}
