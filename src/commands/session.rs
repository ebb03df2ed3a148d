use std::path::PathBuf;
use std::process::ExitCode;

use sitegrade_lib::output::SITEGRADE_OUTPUT_VERSION;
use sitegrade_lib::{
    parse_competitor_list, recommendations, write_report, AnalysisOutput, AnalysisResult,
    Analyzer, ComparisonOutput, HistoryOutput, ReportOutput, Session, SitegradeError,
    SitegradeOutput, REPORT_MIME_TYPE,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::cli::{AcquisitionArgs, OutputFormat};
use crate::formatting::{print_error, render_error, write_output};
use crate::pipeline::{build_analyzer, build_session};
use crate::settings::{load_config, log_effective_config, resolve_settings};

const HELP: &str = "\
commands:
  analyze <url> [competitor ...]  analyze a site against space-separated competitors
  compare                         competitor table for the latest analysis
  history                         list past analyses
  show <n>                        full result of history entry n
  report <dir>                    write website_analysis_report.json into dir
  help                            this text
  quit | exit                     leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionCommand {
    Analyze { url: String, competitors: Vec<String> },
    Compare,
    History,
    Show(usize),
    Report(PathBuf),
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<SessionCommand>, SitegradeError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();
    let command = match head {
        "analyze" => {
            let (url, competitors) = rest
                .split_first()
                .ok_or_else(|| SitegradeError::Session("usage: analyze <url> [competitor ...]".into()))?;
            SessionCommand::Analyze {
                url: url.to_string(),
                competitors: parse_competitor_list(&competitors.join("\n")),
            }
        }
        "compare" => SessionCommand::Compare,
        "history" => SessionCommand::History,
        "show" => {
            let index = rest
                .first()
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| SitegradeError::Session("usage: show <n>".into()))?;
            SessionCommand::Show(index)
        }
        "report" => {
            let dir = rest
                .first()
                .ok_or_else(|| SitegradeError::Session("usage: report <dir>".into()))?;
            SessionCommand::Report(PathBuf::from(*dir))
        }
        "help" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => {
            return Err(SitegradeError::Session(format!("unknown command '{other}'")));
        }
    };
    Ok(Some(command))
}

fn analysis_output(result: &AnalysisResult) -> SitegradeOutput {
    SitegradeOutput::Analysis(AnalysisOutput {
        version: SITEGRADE_OUTPUT_VERSION.to_string(),
        recommendations: recommendations(&result.summary),
        result: result.clone(),
        report_path: None,
    })
}

fn latest_result(session: &Session) -> Result<&AnalysisResult, SitegradeError> {
    session
        .history
        .latest()
        .ok_or_else(|| SitegradeError::Session("no analysis yet; run `analyze <url>` first".into()))
}

async fn execute(
    analyzer: &Analyzer,
    session: &mut Session,
    command: SessionCommand,
) -> Result<Option<SitegradeOutput>, SitegradeError> {
    let body = match command {
        SessionCommand::Analyze { url, competitors } => {
            let result = analyzer.full_analysis(session, &url, &competitors).await?;
            analysis_output(&result)
        }
        SessionCommand::Compare => SitegradeOutput::Comparison(ComparisonOutput::from_result(
            latest_result(session)?,
        )),
        SessionCommand::History => SitegradeOutput::History(HistoryOutput::from_log(&session.history)),
        SessionCommand::Show(index) => {
            let entry = session.history.get(index).ok_or_else(|| {
                SitegradeError::Session(format!(
                    "no history entry {index} ({} recorded)",
                    session.history.len()
                ))
            })?;
            analysis_output(entry)
        }
        SessionCommand::Report(dir) => {
            let latest = session.history.latest();
            let path = write_report(&dir, latest)?;
            SitegradeOutput::Report(ReportOutput {
                version: SITEGRADE_OUTPUT_VERSION.to_string(),
                path,
                mime_type: REPORT_MIME_TYPE.to_string(),
                has_analysis: latest.is_some(),
            })
        }
        SessionCommand::Help => {
            println!("{HELP}");
            return Ok(None);
        }
        SessionCommand::Quit => return Ok(None),
    };
    Ok(Some(body))
}

/// Read commands from stdin until EOF or `quit`, keeping history between them.
pub async fn run_session(
    raw_args: &[String],
    config_path: Option<PathBuf>,
    acquisition: AcquisitionArgs,
    format: OutputFormat,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, None),
    };
    let config = resolve_settings(raw_args, config, &acquisition);
    log_effective_config(config_path.as_deref(), &config);

    let analyzer = match build_analyzer(&config, &acquisition) {
        Ok(analyzer) => analyzer,
        Err(err) => return render_error(err, format, None),
    };
    let mut session = build_session(&config);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => return render_error(SitegradeError::Io(err), format, None),
        };
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                print_error(&err, format);
                continue;
            }
        };
        debug!(?command, "session command");
        if command == SessionCommand::Quit {
            break;
        }
        match execute(&analyzer, &mut session, command).await {
            Ok(Some(body)) => {
                if let Err(err) = write_output(&body, format, None) {
                    eprintln!("Failed to write output: {err}");
                }
            }
            Ok(None) => {}
            Err(err) => print_error(&err, format),
        }
    }

    info!(runs = session.history.len(), "session closed");
    ExitCode::SUCCESS
}
