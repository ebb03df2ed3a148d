use url::Url;

use crate::error::{Result, SitegradeError};

/// A site to analyze: the address as entered (scheme added if missing) and
/// its parsed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub address: String,
    pub url: Url,
}

pub fn parse_target(input: &str) -> Result<Target> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SitegradeError::config("target URL is empty"));
    }
    let address = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    let url = Url::parse(&address)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SitegradeError::config(format!(
            "unsupported scheme '{}' (expected http or https)",
            url.scheme()
        )));
    }
    if url.host_str().is_none() {
        return Err(SitegradeError::config(format!("'{address}' has no host")));
    }
    Ok(Target { address, url })
}

/// Split a list of URLs separated by newlines or other whitespace.
///
/// Commas are left alone since they are legal inside paths and queries.
pub fn parse_competitor_list(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}
