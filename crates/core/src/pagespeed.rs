//! PageSpeed Insights client for measured performance scoring.
//!
//! One GET against the PSI v5 endpoint with the mobile strategy, decoding
//! only the four Lighthouse audits the performance pillar reads. Any
//! failure — transport, status, or a response missing the Lighthouse
//! section — yields `None` and the pillar falls back to heuristic mode.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use url::Url;

const PSI_ENDPOINT: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

/// The PSI call gets a generous budget; Lighthouse runs are slow.
const PSI_TIMEOUT_SECS: u64 = 45;

/// The field-data subset of a PSI response the performance pillar uses.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageSpeedMetrics {
    /// Largest contentful paint, in seconds.
    pub lcp_s: Option<f64>,
    /// Cumulative layout shift (unitless).
    pub cls: Option<f64>,
    /// Total blocking time, in milliseconds. Used as an input-delay proxy.
    pub tbt_ms: Option<f64>,
    /// Time to interactive, in milliseconds.
    pub interactive_ms: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct PsiResponse {
    #[serde(rename = "lighthouseResult")]
    lighthouse_result: Option<LighthouseResult>,
}

#[derive(Debug, Deserialize)]
struct LighthouseResult {
    #[serde(default)]
    audits: HashMap<String, AuditEntry>,
}

#[derive(Debug, Deserialize)]
struct AuditEntry {
    #[serde(rename = "numericValue")]
    numeric_value: Option<f64>,
}

impl PageSpeedMetrics {
    fn from_response(response: PsiResponse) -> Option<Self> {
        let audits = response.lighthouse_result?.audits;
        let numeric = |key: &str| audits.get(key).and_then(|a| a.numeric_value);

        Some(Self {
            lcp_s: numeric("largest-contentful-paint").map(|ms| ms / 1000.0),
            cls: numeric("cumulative-layout-shift"),
            tbt_ms: numeric("total-blocking-time"),
            interactive_ms: numeric("interactive"),
        })
    }
}

/// Queries PageSpeed Insights for the target URL with the mobile strategy.
///
/// Returns `None` on any failure; the caller degrades to heuristic mode.
pub async fn fetch_metrics(client: &Client, url: &Url, api_key: &str) -> Option<PageSpeedMetrics> {
    let mut params = vec![("url", url.as_str()), ("strategy", "mobile")];
    if !api_key.is_empty() {
        params.push(("key", api_key));
    }

    let response = client
        .get(PSI_ENDPOINT)
        .query(&params)
        .timeout(Duration::from_secs(PSI_TIMEOUT_SECS))
        .send()
        .await
        .ok()?;

    if !response.status().is_success() {
        return None;
    }

    let decoded: PsiResponse = response.json().await.ok()?;
    PageSpeedMetrics::from_response(decoded)
}
