//! Page and resource fetching over HTTP.
//!
//! This module provides the HTTP surface of an audit run: retrieving the
//! target page (with an optional retry through the ScraperAPI proxy when a
//! key is configured), issuing lightweight HEAD probes against sampled
//! resources, and pulling stylesheet bodies for the mobile checks.
//!
//! Only [`fetch_html`] can fail an audit. The probe and stylesheet helpers
//! return `Option` and swallow every transport error: a resource that cannot
//! be reached simply counts as broken or undetected for that one check.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{AuditError, Result};

/// Timeout for individual HEAD probes, in seconds.
pub const PROBE_TIMEOUT_SECS: u64 = 6;

/// Timeout for stylesheet fetches, in seconds.
pub const STYLESHEET_TIMEOUT_SECS: u64 = 10;

/// Timeout for the proxy fallback fetch, in seconds.
const FALLBACK_TIMEOUT_SECS: u64 = 30;

/// HTTP client configuration for an audit run.
///
/// This struct controls timeout, user agent, and proxy-fallback settings
/// for the primary page fetch.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout for the primary page fetch, in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
    /// Optional ScraperAPI key; enables a single proxy retry when the
    /// direct fetch fails.
    pub scraper_api_key: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 15,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/115.0 Safari/537.36"
                .to_string(),
            scraper_api_key: None,
        }
    }
}

/// Outcome of a HEAD probe against a sampled resource.
#[derive(Debug, Clone, Copy)]
pub struct ProbeResponse {
    /// HTTP status code of the final response after redirects.
    pub status: u16,
    /// Value of the Content-Length header, when the server sent one.
    pub content_length: Option<u64>,
}

impl ProbeResponse {
    /// Whether the probed resource should count as broken (status >= 400).
    pub fn is_broken(&self) -> bool {
        self.status >= 400
    }
}

/// Builds the shared HTTP client used for every request in one audit run.
///
/// Redirects are followed and the configured User-Agent is attached as the
/// client default; per-request timeouts are set at each call site since the
/// page fetch, probes, and stylesheet fetches use different budgets.
pub fn build_client(config: &FetchConfig) -> Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(AuditError::HttpError)
}

/// Fetches the HTML of the audit target.
///
/// Performs a direct GET first. If that attempt fails (transport error or
/// non-success status) and a ScraperAPI key is configured, retries once
/// through the proxy endpoint. When both attempts fail the audit cannot
/// proceed and [`AuditError::FetchFailed`] is returned carrying the last
/// observed status, if any.
pub async fn fetch_html(client: &Client, url: &Url, config: &FetchConfig) -> Result<String> {
    let mut last_status = None;

    match client
        .get(url.clone())
        .timeout(Duration::from_secs(config.timeout))
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
    {
        Ok(response) if response.status().is_success() => {
            return response.text().await.map_err(AuditError::HttpError);
        }
        Ok(response) => last_status = Some(response.status().as_u16()),
        Err(_) => {}
    }

    if let Some(key) = &config.scraper_api_key {
        let proxy = format!(
            "http://api.scraperapi.com?api_key={}&url={}",
            key,
            url.as_str()
        );
        match client
            .get(&proxy)
            .timeout(Duration::from_secs(FALLBACK_TIMEOUT_SECS))
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                return response.text().await.map_err(AuditError::HttpError);
            }
            Ok(response) => last_status = Some(response.status().as_u16()),
            Err(_) => {}
        }
    }

    Err(AuditError::FetchFailed { status: last_status })
}

/// Issues a HEAD probe against a sampled resource URL.
///
/// Used for the broken-link check and for reading image byte sizes from
/// Content-Length headers. Returns `None` on any transport failure so
/// callers can treat the resource as unreachable without aborting the run.
pub async fn probe(client: &Client, url: &Url) -> Option<ProbeResponse> {
    let response = client
        .head(url.clone())
        .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
        .send()
        .await
        .ok()?;

    Some(ProbeResponse {
        status: response.status().as_u16(),
        content_length: response.content_length(),
    })
}

/// Fetches the body of a linked stylesheet.
///
/// Returns `None` on transport failure or a non-success status; the caller
/// falls back to "not detected" for whatever it was searching for.
pub async fn fetch_text(client: &Client, url: &Url) -> Option<String> {
    let response = client
        .get(url.clone())
        .timeout(Duration::from_secs(STYLESHEET_TIMEOUT_SECS))
        .send()
        .await
        .ok()?;

    if !response.status().is_success() {
        return None;
    }

    response.text().await.ok()
}
