//! Text extraction from screenshots.
//!
//! The default extractor shells out to the `tesseract` binary, piping the
//! screenshot in as PNG and reading plain text back from stdout.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use image::DynamicImage;
use thiserror::Error;
use tracing::debug;

use crate::image_loader::encode_png;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR engine not available: {0}")]
    NotAvailable(String),
    #[error("OCR disabled")]
    Disabled,
    #[error("OCR extraction failed: {0}")]
    Failed(String),
}

pub trait TextExtractor {
    fn extract_text(&self, image: &DynamicImage) -> Result<String, OcrError>;
}

#[derive(Debug, Clone)]
pub struct TesseractCli {
    pub command: String,
    pub language: String,
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self {
            command: "tesseract".to_string(),
            language: "eng".to_string(),
        }
    }
}

impl TesseractCli {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Default::default()
        }
    }
}

impl TextExtractor for TesseractCli {
    fn extract_text(&self, image: &DynamicImage) -> Result<String, OcrError> {
        let png = encode_png(image).map_err(|e| OcrError::Failed(e.to_string()))?;

        let mut child = Command::new(&self.command)
            .args(["stdin", "stdout", "-l", &self.language])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => OcrError::NotAvailable(format!("{} not found", self.command)),
                _ => OcrError::Failed(e.to_string()),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(&png) {
                drop(stdin);
                let _ = child.kill();
                let _ = child.wait();
                return Err(OcrError::Failed(format!("failed to pipe image: {e}")));
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| OcrError::Failed(e.to_string()))?;
        if !output.status.success() {
            return Err(OcrError::Failed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(chars = text.chars().count(), "tesseract finished");
        Ok(text)
    }
}

/// Extractor used when OCR is switched off; every call fails with [`OcrError::Disabled`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOcr;

impl TextExtractor for NoOcr {
    fn extract_text(&self, _image: &DynamicImage) -> Result<String, OcrError> {
        Err(OcrError::Disabled)
    }
}
