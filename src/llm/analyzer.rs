use std::sync::Arc;

use crate::config::AnalyzerConfig;
use crate::llm::mock::mock_qualitative;
use crate::llm::parser::{parse_qualitative_response, MalformedReason, ParsedResponse};
use crate::llm::prompts::qualitative_prompt;
use crate::llm::provider::LLMProvider;
use crate::llm::retry::RetryState;
use crate::models::{BaseScores, ProfileSnapshot, QualitativeResult};

/// Qualitative overlay on top of the deterministic scores.
///
/// `analyze` never fails: every failure path ends in a neutral result whose
/// summary says what went wrong.
pub struct QualitativeAnalyzer {
    provider: Option<Arc<dyn LLMProvider>>,
    config: AnalyzerConfig,
}

enum Attempt {
    Finished(QualitativeResult),
    Failed(String),
}

impl QualitativeAnalyzer {
    pub fn new(provider: Option<Arc<dyn LLMProvider>>, config: AnalyzerConfig) -> Self {
        Self { provider, config }
    }

    pub async fn analyze(&self, snapshot: &ProfileSnapshot, scores: &BaseScores) -> QualitativeResult {
        if self.config.mock_mode {
            tracing::info!("Mock mode enabled, returning templated qualitative analysis");
            return mock_qualitative(snapshot, scores);
        }

        let Some(provider) = self.provider.as_deref() else {
            tracing::warn!("No OpenRouter API key configured, skipping qualitative analysis");
            return QualitativeResult::fallback("API key missing.");
        };

        let prompt = qualitative_prompt(snapshot, scores);
        let policy = self.config.retry;
        let mut state = policy.start();
        let mut last_error = String::new();

        loop {
            state = match state {
                RetryState::Attempting(attempt) => {
                    tracing::info!(
                        "Sending qualitative analysis request to {} (attempt {})",
                        provider.name(),
                        attempt
                    );
                    match self.attempt(provider, &prompt).await {
                        Attempt::Finished(result) => return result,
                        Attempt::Failed(error) => {
                            tracing::warn!("Qualitative analysis attempt {} failed: {}", attempt, error);
                            last_error = error;
                            policy.on_failure(attempt)
                        }
                    }
                }
                RetryState::Retrying { next, delay } => {
                    tracing::info!("Retrying qualitative analysis in {:?}", delay);
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    RetryState::Attempting(next)
                }
                RetryState::Exhausted => {
                    tracing::warn!("Qualitative analysis gave up after {} attempts", policy.max_attempts);
                    return QualitativeResult::fallback(format!("AI analysis failed: {}", last_error));
                }
            };
        }
    }

    async fn attempt(&self, provider: &dyn LLMProvider, prompt: &str) -> Attempt {
        let raw = match provider.complete(prompt).await {
            Ok(raw) => raw,
            Err(e) if e.is_retryable() => return Attempt::Failed(e.to_string()),
            Err(e) => {
                return Attempt::Finished(QualitativeResult::fallback(format!(
                    "AI analysis failed: {}",
                    e
                )))
            }
        };

        match parse_qualitative_response(&raw) {
            ParsedResponse::Valid(result) => {
                tracing::info!(
                    "Parsed qualitative analysis, context_multiplier: {}",
                    result.context_multiplier.value()
                );
                Attempt::Finished(result)
            }
            ParsedResponse::Malformed {
                raw,
                reason: MalformedReason::NotJson(e),
            } => {
                tracing::warn!("Model response is not JSON: {}", e);
                tracing::debug!("Unparsable response: {}", raw);
                Attempt::Finished(QualitativeResult::fallback(format!("JSON parsing error: {}", e)))
            }
            ParsedResponse::Malformed {
                raw,
                reason: MalformedReason::Schema(e),
            } => {
                tracing::debug!("Response failing validation: {}", raw);
                Attempt::Failed(format!("response failed validation: {}", e))
            }
        }
    }
}
