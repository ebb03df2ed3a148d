//! Versioned output envelope shared by every command.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ErrorPayload;
use crate::metrics::Recommendation;
use crate::session::HistoryLog;
use crate::types::{AnalysisResult, SiteComparison};

pub const SITEGRADE_OUTPUT_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SitegradeOutput {
    Analysis(AnalysisOutput),
    Comparison(ComparisonOutput),
    History(HistoryOutput),
    Report(ReportOutput),
    Error(ErrorOutput),
}

/// Primary panel: scores for the latest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub version: String,
    pub result: AnalysisResult,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<PathBuf>,
}

/// Competitor panel: the analyzed site first, then each competitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutput {
    pub version: String,
    pub url: String,
    pub sites: Vec<SiteComparison>,
}

impl ComparisonOutput {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            version: SITEGRADE_OUTPUT_VERSION.to_string(),
            url: result.url.clone(),
            sites: result.competitor_scores.clone(),
        }
    }
}

/// History panel: one line per past run, newest first. `index` is the run's
/// position in the log, so `show <index>` still finds it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryOutput {
    pub version: String,
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub index: usize,
    pub url: String,
    pub date: String,
    pub ux_ui: f64,
    pub seo: f64,
    pub content: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub competitors: Vec<String>,
}

impl HistoryOutput {
    pub fn from_log(log: &HistoryLog) -> Self {
        let entries = log
            .entries()
            .iter()
            .enumerate()
            .rev()
            .map(|(index, entry)| HistoryEntry {
                index,
                url: entry.url.clone(),
                date: entry.display_date(),
                ux_ui: entry.summary.ux_ui,
                seo: entry.summary.seo,
                content: entry.summary.content,
                competitors: entry.competitor_urls.clone(),
            })
            .collect();
        Self {
            version: SITEGRADE_OUTPUT_VERSION.to_string(),
            entries,
        }
    }
}

/// Where the downloadable report went.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOutput {
    pub version: String,
    pub path: PathBuf,
    pub mime_type: String,
    /// False when history was empty and `{}` was written
    pub has_analysis: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}
