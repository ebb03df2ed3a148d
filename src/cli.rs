use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "sitegrade",
    version,
    about = "Grade a website's UX/UI, SEO and content from a screenshot and its HTML"
)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log progress to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze one site, optionally against competitors
    Analyze {
        /// Site to analyze (https:// is assumed when no scheme is given)
        #[arg(long)]
        url: String,

        /// Competitor URLs, separated by newlines or spaces
        #[arg(long)]
        competitors: Option<String>,

        #[command(flatten)]
        acquisition: AcquisitionArgs,

        /// Directory to write website_analysis_report.json into
        #[arg(long)]
        report: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,

        /// Write output to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Interactive session reading commands from stdin
    Session {
        #[command(flatten)]
        acquisition: AcquisitionArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Args)]
pub struct AcquisitionArgs {
    /// Use a local screenshot instead of the screenshot API
    #[arg(long)]
    pub screenshot: Option<PathBuf>,

    /// Use a local HTML file instead of fetching the page
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Never touch the network; inputs not given locally fall back
    #[arg(long)]
    pub offline: bool,

    /// Skip OCR; typography falls back to its neutral score
    #[arg(long)]
    pub no_ocr: bool,

    /// Seed for the simulated metrics
    #[arg(long)]
    pub seed: Option<u64>,

    /// Page fetch timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub page_timeout: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Pretty,
    Yaml,
}

pub fn parse() -> Cli {
    Cli::parse()
}
