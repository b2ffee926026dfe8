//! Error types for Pentaudit operations.
//!
//! This module defines the main error type [`AuditError`] which represents
//! all possible errors that can occur while fetching and analyzing a page.
//!
//! Only a handful of conditions are fatal to an audit run: an invalid URL,
//! or failing to retrieve the target page through both the direct fetch and
//! the proxy fallback. Everything downstream of a successful fetch (broken
//! probes, unreadable stylesheets, a missing PageSpeed response) degrades
//! gracefully inside the scorers and never surfaces here.

use thiserror::Error;

/// Main error type for audit operations.
///
/// # Example
///
/// ```rust
/// use pentaudit_core::{AuditError, Result};
///
/// fn check_input(url: &str) -> Result<()> {
///     if !url.starts_with("http") {
///         return Err(AuditError::InvalidUrl(url.to_string()));
///     }
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum AuditError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or is malformed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The target page could not be retrieved.
    ///
    /// Returned when the direct fetch and the proxy fallback (if configured)
    /// both fail. This is the only run-aborting failure an audit produces:
    /// without the page HTML there is nothing to score.
    #[error("failed to fetch or analyze the page (last status: {status:?})")]
    FetchFailed { status: Option<u16> },

    /// HTML parsing errors.
    ///
    /// Returned when HTML cannot be parsed, often due to an invalid
    /// CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),
}

/// Result type alias for AuditError.
///
/// This is a convenience alias for `std::result::Result<T, AuditError>`.
pub type Result<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuditError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_fetch_failed_error() {
        let err = AuditError::FetchFailed { status: Some(500) };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("fetch or analyze"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = AuditError::HtmlParseError("bad selector".to_string());
        assert!(err.to_string().contains("bad selector"));
    }
}
