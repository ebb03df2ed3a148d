//! Acquisition of the raw inputs: a screenshot and the page HTML.
//!
//! Sources never fail. A failed fetch yields a blank gray screenshot or an
//! empty document wrapped in [`Collected::Fallback`].

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use image::DynamicImage;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::config::{Config, FallbackImage};
use crate::error::Result;
use crate::image_loader::{decode_image, fallback_image, load_image, ImageLoadError};
use crate::types::Collected;

#[derive(Debug, Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid screenshot API URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("screenshot API response has no `screenshot` field")]
    MissingImageUrl,
    #[error(transparent)]
    Image(#[from] ImageLoadError),
}

#[async_trait]
pub trait SiteSource: Send + Sync {
    async fn screenshot(&self, url: &Url) -> Collected<DynamicImage>;

    async fn html(&self, url: &Url) -> Collected<String>;
}

#[derive(Debug, Deserialize)]
struct ScreenshotResponse {
    screenshot: Option<String>,
}

/// Screenshots through a third-party rendering API, HTML straight from the site.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    endpoint: Url,
    page_timeout: Duration,
    screenshot_timeout: Duration,
    fallback: FallbackImage,
}

impl HttpSource {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            client,
            endpoint: Url::parse(&config.screenshot_endpoint)?,
            page_timeout: config.timeouts.page,
            screenshot_timeout: config.timeouts.screenshot,
            fallback: config.fallback_image,
        })
    }

    /// `{endpoint}?url=<target>&fresh=true&output=json`
    pub fn screenshot_api_url(&self, target: &Url) -> std::result::Result<Url, url::ParseError> {
        Url::parse_with_params(
            self.endpoint.as_str(),
            &[
                ("url", target.as_str()),
                ("fresh", "true"),
                ("output", "json"),
            ],
        )
    }

    async fn fetch_screenshot(&self, target: &Url) -> std::result::Result<DynamicImage, FetchError> {
        let api_url = self.screenshot_api_url(target)?;
        let body: ScreenshotResponse = self
            .client
            .get(api_url)
            .timeout(self.screenshot_timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let image_url = body.screenshot.ok_or(FetchError::MissingImageUrl)?;
        debug!(%image_url, "downloading screenshot");
        let bytes = self
            .client
            .get(image_url)
            .timeout(self.screenshot_timeout)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(decode_image(&bytes)?)
    }

    async fn fetch_html(&self, target: &Url) -> std::result::Result<String, FetchError> {
        let response = self
            .client
            .get(target.clone())
            .timeout(self.page_timeout)
            .send()
            .await?;
        debug!(status = %response.status(), "page fetched");
        Ok(response.text().await?)
    }
}

#[async_trait]
impl SiteSource for HttpSource {
    async fn screenshot(&self, url: &Url) -> Collected<DynamicImage> {
        match self.fetch_screenshot(url).await {
            Ok(img) => Collected::Measured(img),
            Err(err) => {
                warn!(%url, error = %err, "screenshot unavailable; using blank canvas");
                Collected::fallback(
                    fallback_image(self.fallback.width, self.fallback.height),
                    err.to_string(),
                )
            }
        }
    }

    async fn html(&self, url: &Url) -> Collected<String> {
        match self.fetch_html(url).await {
            Ok(html) => Collected::Measured(html),
            Err(err) => {
                warn!(%url, error = %err, "page fetch failed; using empty document");
                Collected::fallback(String::new(), err.to_string())
            }
        }
    }
}

/// Inputs read from local files, deferring to `inner` for anything not given.
///
/// Without an inner source, missing inputs fall back immediately.
pub struct FileSource {
    pub screenshot: Option<PathBuf>,
    pub html: Option<PathBuf>,
    pub inner: Option<Box<dyn SiteSource>>,
    pub fallback: FallbackImage,
}

impl FileSource {
    pub fn offline(screenshot: Option<PathBuf>, html: Option<PathBuf>) -> Self {
        Self {
            screenshot,
            html,
            inner: None,
            fallback: FallbackImage::default(),
        }
    }
}

#[async_trait]
impl SiteSource for FileSource {
    async fn screenshot(&self, url: &Url) -> Collected<DynamicImage> {
        let blank = || fallback_image(self.fallback.width, self.fallback.height);
        match (&self.screenshot, &self.inner) {
            (Some(path), _) => match load_image(path) {
                Ok(img) => Collected::Measured(img),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "screenshot file unreadable");
                    Collected::fallback(blank(), err.to_string())
                }
            },
            (None, Some(inner)) => inner.screenshot(url).await,
            (None, None) => Collected::fallback(blank(), "no screenshot provided (offline)"),
        }
    }

    async fn html(&self, url: &Url) -> Collected<String> {
        match (&self.html, &self.inner) {
            (Some(path), _) => match tokio::fs::read_to_string(path).await {
                Ok(html) => Collected::Measured(html),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "HTML file unreadable");
                    Collected::fallback(String::new(), err.to_string())
                }
            },
            (None, Some(inner)) => inner.html(url).await,
            (None, None) => Collected::fallback(String::new(), "no HTML provided (offline)"),
        }
    }
}
