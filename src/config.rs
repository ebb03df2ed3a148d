//! TOML configuration.
//!
//! Every field has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! screenshot_endpoint = "https://screenshotapi.net/api/v1/screenshot"
//! user_agent = "Mozilla/5.0"
//! seed = 7
//!
//! [timeouts]
//! page = "10s"
//! screenshot = "30s"
//!
//! [weights]
//! content_quality = 0.5
//! uniqueness = 0.2
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::metrics::{MetricStore, WeightOverrides};
use crate::types::MetricId;

pub const DEFAULT_SCREENSHOT_ENDPOINT: &str = "https://screenshotapi.net/api/v1/screenshot";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub screenshot_endpoint: String,
    pub user_agent: String,
    pub ocr_command: String,
    pub ocr_language: String,
    /// Seed for the simulated metrics; random per run when absent
    pub seed: Option<u64>,
    pub timeouts: Timeouts,
    pub fallback_image: FallbackImage,
    /// Metric id -> weight overrides
    pub weights: BTreeMap<String, f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screenshot_endpoint: DEFAULT_SCREENSHOT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            ocr_command: "tesseract".to_string(),
            ocr_language: "eng".to_string(),
            seed: None,
            timeouts: Timeouts::default(),
            fallback_image: FallbackImage::default(),
            weights: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    /// Fetching the target page's HTML
    #[serde(with = "humantime_serde")]
    pub page: Duration,
    /// Screenshot API call plus image download
    #[serde(with = "humantime_serde")]
    pub screenshot: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            page: Duration::from_secs(10),
            screenshot: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackImage {
    pub width: u32,
    pub height: u32,
}

impl Default for FallbackImage {
    fn default() -> Self {
        Self {
            width: crate::image_loader::FALLBACK_WIDTH,
            height: crate::image_loader::FALLBACK_HEIGHT,
        }
    }
}

impl Config {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn weight_overrides(&self) -> Result<WeightOverrides, ConfigError> {
        self.weights
            .iter()
            .map(|(name, weight)| {
                let id = name.parse::<MetricId>().map_err(ConfigError::Invalid)?;
                Ok((id, *weight))
            })
            .collect()
    }

    pub fn metric_store(&self) -> Result<MetricStore, ConfigError> {
        MetricStore::with_weights(&self.weight_overrides()?)
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.screenshot_endpoint).map_err(|e| {
            ConfigError::Invalid(format!(
                "screenshot_endpoint '{}' is not a URL: {e}",
                self.screenshot_endpoint
            ))
        })?;
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid("user_agent must not be empty".into()));
        }
        if self.timeouts.page.is_zero() || self.timeouts.screenshot.is_zero() {
            return Err(ConfigError::Invalid("timeouts must be positive".into()));
        }
        if self.fallback_image.width == 0 || self.fallback_image.height == 0 {
            return Err(ConfigError::Invalid(
                "fallback_image width and height must be positive".into(),
            ));
        }
        self.metric_store()?;
        Ok(())
    }
}
