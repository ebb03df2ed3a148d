use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use sitegrade_lib::output::SITEGRADE_OUTPUT_VERSION;
use sitegrade_lib::{ErrorOutput, SitegradeError, SitegradeOutput};

use crate::cli::OutputFormat;

pub fn write_output(
    body: &SitegradeOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => write_json_output(body, output.as_deref())?,
        OutputFormat::Pretty => write_pretty_output(body, output.as_deref())?,
        OutputFormat::Yaml => write_yaml_output(body, output.as_deref())?,
    };
    Ok(())
}

pub fn error_output(err: &SitegradeError) -> SitegradeOutput {
    let error_payload = err.to_payload();
    SitegradeOutput::Error(ErrorOutput {
        version: SITEGRADE_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    })
}

pub fn render_error(err: SitegradeError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    let payload = error_output(&err);

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            if let Some(path) = output {
                if let Err(write_err) = std::fs::write(&path, &content) {
                    eprintln!("Failed to write error output: {}", write_err);
                    println!("{content}");
                }
            } else {
                println!("{content}");
            }
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload, output.as_deref()) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
        OutputFormat::Yaml => {
            if let Err(write_err) = write_yaml_output(&payload, output.as_deref()) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    ExitCode::from(2)
}

/// Report a recoverable error inside the session and keep going.
pub fn print_error(err: &SitegradeError, format: OutputFormat) {
    if let Err(write_err) = write_output(&error_output(err), format, None) {
        eprintln!("Failed to write error output: {}", write_err);
    }
}

fn write_json_output(
    body: &SitegradeOutput,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_json::to_string(body)?;
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

fn write_yaml_output(
    body: &SitegradeOutput,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_yaml::to_string(body)?;
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        print!("{content}");
    }
    Ok(())
}

fn write_pretty_output(body: &SitegradeOutput, output: Option<&Path>) -> io::Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let use_human = output.is_none() && stdout_is_tty;

    if use_human {
        let content = format_pretty(body, true);
        println!("{content}");
        return Ok(());
    }

    // Pipes and files get JSON.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    if let Some(path) = output {
        std::fs::write(path, &content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

pub fn format_pretty(body: &SitegradeOutput, colorize: bool) -> String {
    let format_score = |score: f64| color(&format!("{:5.1}", score), score_color_code(score), colorize);

    match body {
        SitegradeOutput::Analysis(out) => {
            let result = &out.result;
            let mut buf = String::new();
            let header = color("[ANALYSIS]", "36", colorize);
            writeln!(buf, "{} {} ({})", header, result.url, result.display_date()).ok();
            writeln!(buf, "Summary:").ok();
            writeln!(buf, "- {:10} {}", "UX/UI", format_score(result.summary.ux_ui)).ok();
            writeln!(buf, "- {:10} {}", "SEO", format_score(result.summary.seo)).ok();
            writeln!(buf, "- {:10} {}", "Content", format_score(result.summary.content)).ok();

            for (category, metrics) in &result.scores {
                writeln!(buf, "{}:", category.label()).ok();
                for (metric, value) in metrics {
                    writeln!(buf, "  {:20} {}", metric.label(), format_score(*value)).ok();
                }
            }

            if !result.degradations.is_empty() {
                writeln!(buf, "Fallbacks used:").ok();
                for d in &result.degradations {
                    writeln!(buf, "- {}: {}", d.source, d.reason).ok();
                }
            }

            if !out.recommendations.is_empty() {
                writeln!(buf, "Recommendations:").ok();
                for rec in &out.recommendations {
                    writeln!(
                        buf,
                        "- {} ({:.1} < {:.0})",
                        rec.category.label(),
                        rec.score,
                        rec.threshold
                    )
                    .ok();
                    for s in &rec.suggestions {
                        writeln!(buf, "    * {s}").ok();
                    }
                }
            }

            if !result.competitor_scores.is_empty() {
                writeln!(buf, "Competitors: {}", result.competitor_scores.len()).ok();
            }
            if let Some(path) = &out.report_path {
                writeln!(buf, "Report: {}", path.display()).ok();
            }
            buf
        }
        SitegradeOutput::Comparison(out) => {
            let mut buf = String::new();
            let header = color("[COMPARE]", "34", colorize);
            writeln!(buf, "{} {}", header, out.url).ok();
            if out.sites.is_empty() {
                writeln!(buf, "No competitors were analyzed.").ok();
                return buf;
            }
            writeln!(
                buf,
                "{:40} {:>6} {:>6} {:>6} {:>6}",
                "site", "total", "speed", "seo", "ux"
            )
            .ok();
            for site in &out.sites {
                writeln!(
                    buf,
                    "{:40} {} {} {} {}",
                    site.url,
                    format_score(site.score.total),
                    format_score(site.score.speed),
                    format_score(site.score.seo),
                    format_score(site.score.ux)
                )
                .ok();
            }
            buf
        }
        SitegradeOutput::History(out) => {
            let mut buf = String::new();
            let header = color("[HISTORY]", "35", colorize);
            writeln!(buf, "{} {} run(s)", header, out.entries.len()).ok();
            for entry in &out.entries {
                writeln!(
                    buf,
                    "#{} {} {} ux/ui {:.1} seo {:.1} content {:.1}",
                    entry.index, entry.date, entry.url, entry.ux_ui, entry.seo, entry.content
                )
                .ok();
            }
            buf
        }
        SitegradeOutput::Report(out) => {
            let mut buf = String::new();
            let header = color("[REPORT]", "32", colorize);
            writeln!(buf, "{} {} ({})", header, out.path.display(), out.mime_type).ok();
            if !out.has_analysis {
                writeln!(buf, "No analysis yet; wrote an empty report.").ok();
            }
            buf
        }
        SitegradeOutput::Error(out) => {
            let mut buf = String::new();
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or_else(|| out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
            buf
        }
    }
}

fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

fn score_color_code(score: f64) -> &'static str {
    if score >= 80.0 {
        "32" // green
    } else if score >= 60.0 {
        "33" // yellow
    } else {
        "31" // red
    }
}
