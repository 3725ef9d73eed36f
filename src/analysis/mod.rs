pub mod aggregator;
pub mod scoring;
pub mod combiner;
pub mod pipeline;

pub use aggregator::DataAggregator;
pub use scoring::{ScoreWeights, ScoringEngine};
pub use combiner::combine;
pub use pipeline::RatingPipeline;
