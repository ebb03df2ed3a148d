//! Metric store and weighted aggregation.

mod scoring;
mod store;

pub use scoring::{aggregate, aggregate_all, recommendations, score_table, Recommendation};
pub use store::{MetricStore, WeightOverrides, WEIGHT_TOLERANCE};
