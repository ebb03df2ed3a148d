use sitegrade_lib::{
    Analyzer, Config, FileSource, HttpSource, NoOcr, Session, SiteSource, SitegradeError,
    TesseractCli, TextExtractor,
};
use tracing::debug;

use crate::cli::AcquisitionArgs;

/// Wire the acquisition sources, OCR backend and weights chosen on the command line.
pub fn build_analyzer(
    config: &Config,
    acquisition: &AcquisitionArgs,
) -> Result<Analyzer, SitegradeError> {
    let local_inputs = acquisition.screenshot.is_some() || acquisition.html.is_some();
    let source: Box<dyn SiteSource> = if acquisition.offline || local_inputs {
        let inner: Option<Box<dyn SiteSource>> = if acquisition.offline {
            None
        } else {
            Some(Box::new(HttpSource::new(config)?))
        };
        debug!(
            offline = acquisition.offline,
            screenshot = ?acquisition.screenshot,
            html = ?acquisition.html,
            "using local inputs"
        );
        Box::new(FileSource {
            screenshot: acquisition.screenshot.clone(),
            html: acquisition.html.clone(),
            inner,
            fallback: config.fallback_image,
        })
    } else {
        Box::new(HttpSource::new(config)?)
    };

    let extractor: Box<dyn TextExtractor + Send + Sync> = if acquisition.no_ocr {
        Box::new(NoOcr)
    } else {
        Box::new(TesseractCli {
            command: config.ocr_command.clone(),
            language: config.ocr_language.clone(),
        })
    };

    let template = config
        .metric_store()
        .map_err(|e| SitegradeError::Config(format!("Invalid weights: {}", e)))?;
    Ok(Analyzer::new(source, extractor, template))
}

pub fn build_session(config: &Config) -> Session {
    match config.seed {
        Some(seed) => Session::seeded(seed),
        None => Session::default(),
    }
}
