use std::path::PathBuf;
use std::process::ExitCode;

use sitegrade_lib::output::SITEGRADE_OUTPUT_VERSION;
use sitegrade_lib::{
    parse_competitor_list, recommendations, write_report, AnalysisOutput, SitegradeOutput,
};
use tracing::info;

use crate::cli::{AcquisitionArgs, OutputFormat};
use crate::formatting::{render_error, write_output};
use crate::pipeline::{build_analyzer, build_session};
use crate::settings::{load_config, log_effective_config, resolve_settings};

/// Run the one-shot analyze command.
#[allow(clippy::too_many_arguments)]
pub async fn run_analyze(
    raw_args: &[String],
    config_path: Option<PathBuf>,
    url: String,
    competitors: Option<String>,
    acquisition: AcquisitionArgs,
    report: Option<PathBuf>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output),
    };
    let config = resolve_settings(raw_args, config, &acquisition);
    log_effective_config(config_path.as_deref(), &config);

    let analyzer = match build_analyzer(&config, &acquisition) {
        Ok(analyzer) => analyzer,
        Err(err) => return render_error(err, format, output),
    };
    let mut session = build_session(&config);
    let competitors = competitors
        .as_deref()
        .map(parse_competitor_list)
        .unwrap_or_default();

    let result = match analyzer.full_analysis(&mut session, &url, &competitors).await {
        Ok(result) => result,
        Err(err) => return render_error(err, format, output),
    };

    let report_path = match report {
        Some(dir) => match write_report(&dir, session.history.latest()) {
            Ok(path) => Some(path),
            Err(err) => return render_error(err, format, output),
        },
        None => None,
    };

    info!(url = %result.url, "analysis ready");
    let body = SitegradeOutput::Analysis(AnalysisOutput {
        version: SITEGRADE_OUTPUT_VERSION.to_string(),
        recommendations: recommendations(&result.summary),
        result,
        report_path,
    });

    if let Err(err) = write_output(&body, format, output) {
        eprintln!("Failed to write output: {err}");
        return ExitCode::from(2);
    }
    ExitCode::SUCCESS
}
