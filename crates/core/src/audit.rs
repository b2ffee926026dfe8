//! Audit orchestration.
//!
//! [`Auditor`] owns the HTTP client and fetch configuration; [`run`]
//! fetches the page once, snapshots it, classifies the content type, and
//! walks the five pillars in order. Only the primary fetch can fail the
//! audit — every later network observation degrades to a lower score.
//!
//! [`run`]: Auditor::run

use reqwest::Client;
use url::Url;

use crate::content_type::{classify, ContentType};
use crate::error::{AuditError, Result};
use crate::fetch::{build_client, fetch_html, FetchConfig};
use crate::page::Page;
use crate::pillars;
use crate::report::AuditResult;

/// Everything a single audit needs besides the page itself.
///
/// # Example
///
/// ```no_run
/// use pentaudit_core::AuditRequest;
///
/// let request = AuditRequest::new("https://example.com/garden-tools-guide")
///     .keyword("garden tools")
///     .related_terms_from_csv("pruning shears, trowel, soil");
/// ```
#[derive(Debug, Clone, Default)]
pub struct AuditRequest {
    /// The page to audit.
    pub url: String,
    /// Primary keyword; empty disables keyword-dependent checks.
    pub primary_keyword: String,
    /// Related (LSI) terms; empty means the coverage check earns zero.
    pub related_terms: Vec<String>,
    /// Externally measured originality percentage, if any.
    pub originality: Option<f64>,
    /// PageSpeed Insights API key; absent selects heuristic performance.
    pub pagespeed_key: Option<String>,
}

impl AuditRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), ..Default::default() }
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.primary_keyword = keyword.into();
        self
    }

    /// Parses a comma-separated term list, trimming entries and dropping
    /// empty ones.
    pub fn related_terms_from_csv(mut self, csv: &str) -> Self {
        self.related_terms = csv
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        self
    }

    pub fn originality(mut self, pct: Option<f64>) -> Self {
        self.originality = pct;
        self
    }

    pub fn pagespeed_key(mut self, key: Option<String>) -> Self {
        self.pagespeed_key = key;
        self
    }
}

/// Runs audits with a shared HTTP client.
#[derive(Debug, Clone)]
pub struct Auditor {
    client: Client,
    config: FetchConfig,
}

impl Auditor {
    /// Creates an auditor with default fetch settings.
    pub fn new() -> Result<Self> {
        Self::with_config(FetchConfig::default())
    }

    /// Creates an auditor with explicit fetch settings.
    pub fn with_config(config: FetchConfig) -> Result<Self> {
        let client = build_client(&config)?;
        Ok(Self { client, config })
    }

    /// Fetches the page and scores all five pillars.
    ///
    /// Fails only on an invalid URL or when the page cannot be fetched
    /// (including the proxy fallback). Probe and API failures inside the
    /// pillars degrade scores instead of aborting.
    pub async fn run(&self, request: &AuditRequest) -> Result<AuditResult> {
        let url = parse_target_url(&request.url)?;

        let html = fetch_html(&self.client, &url, &self.config).await?;
        let page = Page::from_html(&html, url);
        let content_type = classify(&page);

        let pillars = self.score_pillars(content_type, &page, request).await;
        Ok(AuditResult::from_pillars(content_type, pillars))
    }

    async fn score_pillars(
        &self,
        content_type: ContentType,
        page: &Page,
        request: &AuditRequest,
    ) -> Vec<crate::report::PillarResult> {
        vec![
            pillars::score_content(
                content_type,
                page,
                &request.primary_keyword,
                &request.related_terms,
                request.originality,
            ),
            pillars::score_html_tags(content_type, page),
            pillars::score_links(&self.client, page, &request.primary_keyword).await,
            pillars::score_performance(&self.client, page, request.pagespeed_key.as_deref()).await,
            pillars::score_mobile(&self.client, page).await,
        ]
    }
}

/// Validates and parses the target URL; only http(s) schemes are audited.
fn parse_target_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|_| AuditError::InvalidUrl(trimmed.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AuditError::InvalidUrl(trimmed.to_string()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_related_terms_from_csv() {
        let request =
            AuditRequest::new("https://example.com").related_terms_from_csv(" a, b ,, c,");
        assert_eq!(request.related_terms, vec!["a", "b", "c"]);

        let empty = AuditRequest::new("https://example.com").related_terms_from_csv("  ");
        assert!(empty.related_terms.is_empty());
    }

    #[test]
    fn test_parse_target_url() {
        assert!(parse_target_url("https://example.com/post").is_ok());
        assert!(parse_target_url("  http://example.com  ").is_ok());
        assert!(matches!(
            parse_target_url("not a url"),
            Err(AuditError::InvalidUrl(_))
        ));
        assert!(matches!(
            parse_target_url("ftp://example.com/file"),
            Err(AuditError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_request_builder() {
        let request = AuditRequest::new("https://example.com")
            .keyword("garden tools")
            .originality(Some(92.5))
            .pagespeed_key(Some("key".into()));

        assert_eq!(request.primary_keyword, "garden tools");
        assert_eq!(request.originality, Some(92.5));
        assert_eq!(request.pagespeed_key.as_deref(), Some("key"));
    }
}
