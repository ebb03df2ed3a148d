use std::path::Path;
use std::time::Duration;

use sitegrade_lib::{Config, SitegradeError};
use tracing::debug;

use crate::cli::AcquisitionArgs;

pub fn load_config(path: Option<&Path>) -> Result<Config, SitegradeError> {
    let cfg = if let Some(p) = path {
        Config::from_toml_file(p).map_err(|e| {
            SitegradeError::Config(format!("Failed to read config {}: {}", p.display(), e))
        })?
    } else {
        Config::default()
    };

    cfg.validate()
        .map_err(|e| SitegradeError::Config(format!("Invalid config: {}", e)))?;
    Ok(cfg)
}

pub fn flag_present(args: &[String], flag: &str) -> bool {
    args.iter()
        .any(|arg| arg == flag || arg.starts_with(&format!("{flag}=")))
}

/// Apply command-line values that were given explicitly on top of the config.
pub fn resolve_settings(
    raw_args: &[String],
    mut config: Config,
    acquisition: &AcquisitionArgs,
) -> Config {
    if flag_present(raw_args, "--page-timeout") {
        config.timeouts.page = Duration::from_secs(acquisition.page_timeout.max(1));
    }
    if acquisition.seed.is_some() {
        config.seed = acquisition.seed;
    }
    config
}

pub fn log_effective_config(config_path: Option<&Path>, config: &Config) {
    let source = config_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults/built-in".to_string());
    debug!(
        source = %source,
        endpoint = %config.screenshot_endpoint,
        page_timeout = ?config.timeouts.page,
        screenshot_timeout = ?config.timeouts.screenshot,
        seed = ?config.seed,
        weight_overrides = config.weights.len(),
        "effective config"
    );
}
