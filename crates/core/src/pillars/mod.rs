//! The five scoring pillars.
//!
//! Each pillar exposes a pure `score_*_observed`-style function over
//! already-gathered inputs plus, where network observation is needed, an
//! async wrapper that gathers first and scores second.

pub mod content;
pub mod html_tags;
pub mod links;
pub mod mobile;
pub mod performance;

pub use content::score_content;
pub use html_tags::score_html_tags;
pub use links::{count_broken_links, count_links, score_links, score_links_observed, LinkCounts};
pub use mobile::{score_mobile, score_mobile_observed, MobileSignals};
pub use performance::{score_heuristic, score_measured, score_performance, StaticSignals};
