pub mod analyzer;
pub mod collectors;
pub mod config;
pub mod error;
pub mod image_loader;
pub mod metrics;
pub mod ocr;
pub mod output;
pub mod provider;
pub mod report;
pub mod session;
pub mod source;
pub mod target;
pub mod types;

pub use analyzer::Analyzer;
pub use collectors::{color_score, content_quality_score, navigation_score, seo_tag_score, text_score};
pub use config::{Config, ConfigError};
pub use error::{Result, SitegradeError};
pub use image_loader::{fallback_image, load_image, ImageLoadError};
pub use metrics::{aggregate, aggregate_all, recommendations, MetricStore, Recommendation};
pub use ocr::{NoOcr, OcrError, TesseractCli, TextExtractor};
pub use output::{
    AnalysisOutput, ComparisonOutput, ErrorOutput, HistoryOutput, ReportOutput, SitegradeOutput,
    SITEGRADE_OUTPUT_VERSION,
};
pub use provider::{RandomProvider, ScoringProvider};
pub use report::{report_json, write_report, REPORT_FILE_NAME, REPORT_MIME_TYPE};
pub use session::{Clock, ComparisonCache, HistoryLog, Session, SteppingClock, SystemClock};
pub use source::{FileSource, HttpSource, SiteSource};
pub use target::{parse_competitor_list, parse_target, Target};
pub use types::{
    AnalysisResult, Category, CategoryScores, Collected, CompetitorScore, Degradation,
    MetricDefinition, MetricId, PageAudit, SiteComparison,
};
