//! Per-run result types.
//!
//! An [`AnalysisResult`] is built once at the end of an analysis run and never
//! mutated afterwards; the history log only ever appends them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::metric::{Category, MetricId};

/// Raw metric values of one run, grouped by category.
pub type ScoreTable = BTreeMap<Category, BTreeMap<MetricId, f64>>;

/// Values from the page audit oracle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageAudit {
    pub performance: f64,
    pub accessibility: f64,
    pub best_practices: f64,
    pub seo: f64,
}

/// Coarse comparison score for a site, cached per URL for the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompetitorScore {
    pub total: f64,
    pub speed: f64,
    pub seo: f64,
    pub ux: f64,
}

/// One row of the competitor table: a site and its cached score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteComparison {
    pub url: String,
    #[serde(flatten)]
    pub score: CompetitorScore,
}

/// Aggregate score per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub ux_ui: f64,
    pub seo: f64,
    pub content: f64,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::UxUi => self.ux_ui,
            Category::Seo => self.seo,
            Category::Content => self.content,
        }
    }

    pub fn set(&mut self, category: Category, score: f64) {
        match category {
            Category::UxUi => self.ux_ui = score,
            Category::Seo => self.seo = score,
            Category::Content => self.content = score,
        }
    }
}

/// A fallback taken during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Degradation {
    /// What degraded (e.g. "screenshot", "html", "typography")
    pub source: String,
    pub reason: String,
}

/// Outcome of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub scores: ScoreTable,
    /// Competitor URLs in the order they were given
    #[serde(rename = "competitors")]
    pub competitor_urls: Vec<String>,
    /// Aggregates computed with the weights in force at analysis time
    pub summary: CategoryScores,
    /// Analyzed site first, then competitors in listing order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub competitor_scores: Vec<SiteComparison>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degradations: Vec<Degradation>,
}

impl AnalysisResult {
    pub fn value(&self, metric: MetricId) -> Option<f64> {
        self.scores
            .get(&metric.category())
            .and_then(|m| m.get(&metric))
            .copied()
    }

    /// Timestamp in the short form used by history listings.
    pub fn display_date(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M").to_string()
    }
}
