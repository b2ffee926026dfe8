pub mod audit;
pub mod content_type;
pub mod error;
pub mod fetch;
pub mod page;
pub mod pagespeed;
pub mod parse;
pub mod pillars;
pub mod report;
pub mod text;

pub use audit::{AuditRequest, Auditor};
pub use content_type::{classify, ContentType};
pub use error::{AuditError, Result};
pub use fetch::FetchConfig;
#[doc(hidden)]
pub use fetch::{build_client, fetch_html, fetch_text, probe, ProbeResponse};
pub use page::{Heading, ImageRef, Page};
pub use pagespeed::{fetch_metrics, PageSpeedMetrics};
pub use parse::Document;
pub use pillars::{
    score_content, score_html_tags, score_links, score_mobile, score_performance,
};
pub use report::{AuditResult, Pillar, PillarResult};
#[doc(hidden)]
pub use text::{count_words, flesch_reading_ease, keyword_occurrences, tokens};
