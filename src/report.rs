//! The downloadable report: the most recent analysis as a JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::types::AnalysisResult;

pub const REPORT_FILE_NAME: &str = "website_analysis_report.json";
pub const REPORT_MIME_TYPE: &str = "application/json";

/// JSON body of the report; `{}` when nothing has been analyzed yet.
pub fn report_json(latest: Option<&AnalysisResult>) -> Result<String> {
    match latest {
        Some(result) => Ok(serde_json::to_string_pretty(result)?),
        None => Ok("{}".to_string()),
    }
}

/// Write the report into `dir`, creating it if needed.
pub fn write_report(dir: &Path, latest: Option<&AnalysisResult>) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(REPORT_FILE_NAME);
    fs::write(&path, report_json(latest)?)?;
    info!(path = %path.display(), mime = REPORT_MIME_TYPE, "report written");
    Ok(path)
}
