//! Base values template retrieval.
//!
//! The preview application's base configuration lives outside this repo
//! (typically an HTTP endpoint maintained by the platform team). It is
//! fetched before any cluster mutation so a retrieval failure blocks the
//! run with zero side effects.

use std::path::Path;

use thiserror::Error;

/// Errors retrieving the base values template.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("failed to fetch base values from {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("base values endpoint {url} returned {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("failed to read base values file {path}: {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    #[error("no base values source configured (set [template].base_values or {0})")]
    NotConfigured(&'static str),
}

/// Retrieve the base values document from a URL or local file path.
pub async fn fetch_base_values(source: &str) -> Result<String, TemplateError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        fetch_url(source).await
    } else {
        tokio::fs::read_to_string(Path::new(source))
            .await
            .map_err(|e| TemplateError::ReadFile {
                path: source.to_string(),
                source: e,
            })
    }
}

async fn fetch_url(url: &str) -> Result<String, TemplateError> {
    let response = reqwest::get(url).await.map_err(|e| TemplateError::Fetch {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(TemplateError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| TemplateError::Fetch {
        url: url.to_string(),
        reason: e.to_string(),
    })
}
