//! Data types used throughout the sitegrade library.
//!
//! This module is organized by domain:
//! - [`metric`] - Fixed metric schema (categories, metric ids, definitions)
//! - [`collected`] - Soft-fail wrapper returned by collectors and sources
//! - [`analysis`] - Per-run results, competitor scores and degradations

pub mod analysis;
pub mod collected;
pub mod metric;

pub use analysis::{
    AnalysisResult, CategoryScores, CompetitorScore, Degradation, PageAudit, SiteComparison,
};
pub use collected::Collected;
pub use metric::{Category, MetricDefinition, MetricId};
