use crate::image_loader::ImageLoadError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

#[derive(Debug, Error)]
pub enum SitegradeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Metric store error: {0}")]
    Metric(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(String),
}

impl SitegradeError {
    pub fn metric(message: impl Into<String>) -> Self {
        SitegradeError::Metric(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        SitegradeError::Config(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            SitegradeError::Io(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check that the --report/--output directory exists or can be created and is writable.",
            ),
            SitegradeError::Network(e) => ErrorPayload::new(
                ErrorCategory::Network,
                e.to_string(),
                "The site or screenshot service could not be reached; retry, or pass --screenshot/--html/--offline.",
            ),
            SitegradeError::InvalidUrl(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Pass --url as a host or http(s) URL, e.g. example.com or https://example.com/page.",
            ),
            SitegradeError::Image(e) => ErrorPayload::new(
                ErrorCategory::Image,
                e.to_string(),
                "Pass --screenshot a PNG, JPEG or WebP file.",
            ),
            SitegradeError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "The analysis could not be written as JSON; rerun with --verbose and report the URL that triggered it.",
            ),
            SitegradeError::Metric(msg) => ErrorPayload::new(
                ErrorCategory::Metric,
                msg.to_string(),
                "Each category's weights must sum to 1.0; check [weights] in the config.",
            ),
            SitegradeError::Config(msg) => ErrorPayload::new(
                ErrorCategory::Config,
                msg.to_string(),
                "Check the command-line flags and the values in the --config file.",
            ),
            SitegradeError::Session(msg) => ErrorPayload::new(
                ErrorCategory::Session,
                msg.to_string(),
                "Type `help` in the session for the list of commands.",
            ),
        }
    }
}

impl From<ImageLoadError> for SitegradeError {
    fn from(err: ImageLoadError) -> Self {
        match err {
            ImageLoadError::Load(e) => SitegradeError::Image(e),
            ImageLoadError::NotFound(path) => {
                SitegradeError::Config(format!("File not found: {}", path))
            }
            ImageLoadError::Encode(msg) => SitegradeError::Io(std::io::Error::other(format!(
                "Failed to encode image: {}",
                msg
            ))),
        }
    }
}

pub type Result<T> = std::result::Result<T, SitegradeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Network,
    Image,
    Metric,
    Session,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_categories_follow_variants() {
        let cases = [
            (SitegradeError::config("bad flag"), "config"),
            (SitegradeError::metric("weights"), "metric"),
            (SitegradeError::Session("unknown command".into()), "session"),
        ];
        for (err, expected) in cases {
            let json = serde_json::to_value(err.to_payload()).unwrap();
            assert_eq!(json["category"], expected);
            assert!(json["remediation"].is_string());
        }
    }

    #[test]
    fn bad_url_hint_points_at_the_url_flag() {
        let err: SitegradeError = url::Url::parse("https://").unwrap_err().into();
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Config);
        assert!(payload.remediation.unwrap().contains("--url"));

        let io: SitegradeError = std::io::Error::from(std::io::ErrorKind::PermissionDenied).into();
        assert!(io.to_payload().remediation.unwrap().contains("--report"));
    }

    #[test]
    fn missing_image_becomes_config_error() {
        let err: SitegradeError = ImageLoadError::NotFound("shot.png".into()).into();
        assert!(matches!(err, SitegradeError::Config(ref m) if m.contains("shot.png")));
    }
}
