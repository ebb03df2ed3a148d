mod cli;
mod commands;
mod formatting;
mod pipeline;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "sitegrade={default_level},sitegrade_lib={default_level}"
        ))
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run() -> ExitCode {
    let raw_args: Vec<String> = std::env::args().collect();
    let args = cli::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Analyze {
            url,
            competitors,
            acquisition,
            report,
            format,
            output,
        } => {
            commands::run_analyze(
                &raw_args,
                args.config,
                url,
                competitors,
                acquisition,
                report,
                format,
                output,
            )
            .await
        }
        Commands::Session {
            acquisition,
            format,
        } => commands::run_session(&raw_args, args.config, acquisition, format).await,
    }
}
