//! Content-type detection and the per-type threshold tables.
//!
//! Every pillar scorer keys its thresholds off the [`ContentType`] chosen
//! here, so classification runs once per audit, before any scoring.
//!
//! Detection is a strict priority cascade: URL path conventions first (the
//! most reliable signal), then machine-readable JSON-LD types, then content
//! shape heuristics, then a LandingPage default. The order matters because
//! the categories overlap — a long article living under `/blog/` must stay
//! a Blog Post even when its length would otherwise qualify it as a Pillar
//! Page.

use std::fmt;

use regex::Regex;
use serde::Serialize;

use crate::page::Page;

/// Word/subheading floor above which an article-typed page is upgraded
/// to Pillar Page.
const PILLAR_UPGRADE_WORDS: usize = 2000;
/// Word/subheading floor for the generic (no JSON-LD) Pillar Page heuristic.
const PILLAR_GENERIC_WORDS: usize = 2200;
const PILLAR_MIN_SUBHEADINGS: usize = 6;

/// The kind of page being audited.
///
/// Chosen once per audit by [`classify`]; drives every threshold table in
/// the pillar scorers. `NewsArticle` is never produced by the classifier
/// but keeps its rows in the tables so externally-labelled audits can use
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContentType {
    #[serde(rename = "Blog Post")]
    BlogPost,
    #[serde(rename = "Pillar Page")]
    PillarPage,
    #[serde(rename = "Product Page")]
    ProductPage,
    #[serde(rename = "Service Page")]
    ServicePage,
    #[serde(rename = "FAQ Page")]
    FaqPage,
    #[serde(rename = "Landing Page")]
    LandingPage,
    #[serde(rename = "Home Page")]
    HomePage,
    #[serde(rename = "News Article")]
    NewsArticle,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::BlogPost => "Blog Post",
            Self::PillarPage => "Pillar Page",
            Self::ProductPage => "Product Page",
            Self::ServicePage => "Service Page",
            Self::FaqPage => "FAQ Page",
            Self::LandingPage => "Landing Page",
            Self::HomePage => "Home Page",
            Self::NewsArticle => "News Article",
        };
        f.write_str(label)
    }
}

impl ContentType {
    /// Ideal visible-text word count range.
    pub fn ideal_word_range(&self) -> (usize, usize) {
        match self {
            Self::BlogPost => (1200, 2000),
            Self::PillarPage => (2000, 4000),
            Self::ProductPage => (500, 800),
            Self::ServicePage => (700, 1200),
            Self::FaqPage => (300, 700),
            Self::LandingPage => (400, 900),
            Self::HomePage => (400, 1200),
            Self::NewsArticle => (600, 1000),
        }
    }

    /// Ideal primary-keyword density range, in percent of word count.
    pub fn density_range(&self) -> (f64, f64) {
        match self {
            Self::BlogPost => (1.0, 2.5),
            Self::PillarPage => (0.8, 1.5),
            Self::ProductPage => (1.5, 3.0),
            Self::ServicePage => (1.0, 2.0),
            Self::LandingPage => (0.5, 1.2),
            Self::FaqPage => (0.8, 1.5),
            Self::HomePage => (0.8, 1.8),
            Self::NewsArticle => (0.8, 1.8),
        }
    }

    /// Words of copy per expected related term; the LSI target is
    /// `round(word_count / this)`, floored at one term.
    pub fn lsi_words_per_term(&self) -> usize {
        match self {
            Self::BlogPost => 400,
            Self::PillarPage => 300,
            Self::ProductPage => 400,
            Self::ServicePage => 400,
            Self::FaqPage => 350,
            Self::LandingPage => 500,
            Self::HomePage => 450,
            Self::NewsArticle => 400,
        }
    }

    /// Minimum Flesch reading-ease score for full readability credit.
    pub fn readability_threshold(&self) -> f64 {
        match self {
            Self::BlogPost => 60.0,
            Self::PillarPage => 55.0,
            Self::ProductPage => 65.0,
            Self::ServicePage => 60.0,
            Self::FaqPage => 70.0,
            Self::LandingPage => 65.0,
            Self::HomePage => 60.0,
            Self::NewsArticle => 60.0,
        }
    }

    /// Minimum count of h2-h4 subheadings expected.
    pub fn min_subheadings(&self) -> usize {
        match self {
            Self::BlogPost => 2,
            Self::PillarPage => 5,
            Self::ProductPage => 1,
            Self::ServicePage => 2,
            Self::FaqPage => 3,
            Self::LandingPage => 1,
            Self::HomePage => 2,
            Self::NewsArticle => 2,
        }
    }

    /// JSON-LD `@type` values that count as a schema match.
    pub fn expected_schema_types(&self) -> &'static [&'static str] {
        match self {
            Self::BlogPost => &["Article", "BlogPosting"],
            Self::PillarPage => &["Article", "WebPage"],
            Self::ProductPage => &["Product"],
            Self::ServicePage => &["Service", "LocalBusiness", "Organization"],
            Self::FaqPage => &["FAQPage"],
            Self::LandingPage => &["WebPage"],
            Self::HomePage => &["WebPage", "Organization"],
            Self::NewsArticle => &["NewsArticle", "Article"],
        }
    }
}

/// Detects the content type of a page.
///
/// First match wins, in this order:
/// 1. URL path conventions (`/blog/`, `/product`, `/services`, `/faq`,
///    pricing paths).
/// 2. JSON-LD `@type` values, with long well-structured articles upgraded
///    to Pillar Page.
/// 3. Content-shape heuristics (very long structured copy, quote-request
///    service pages, root-path home pages).
/// 4. Landing Page as the default.
pub fn classify(page: &Page) -> ContentType {
    let url = page.url.as_str().to_lowercase();
    let text = &page.visible_text;
    let intro: String = text.chars().take(600).collect::<String>().to_lowercase();

    if url.contains("/blog/") || url.contains("/article") {
        return ContentType::BlogPost;
    }
    if url.contains("/product") || url.contains("/shop/") {
        return ContentType::ProductPage;
    }
    if url.contains("/services") || url.contains("/service") || intro.contains("solutions") {
        return ContentType::ServicePage;
    }
    if url.contains("/faq") {
        return ContentType::FaqPage;
    }
    let pricing_re = Regex::new(r"/(pricing|price)\b").unwrap();
    if pricing_re.is_match(&url) {
        return ContentType::LandingPage;
    }

    let types = page.json_ld_types();
    if types.iter().any(|t| t == "Product") {
        return ContentType::ProductPage;
    }
    if types.iter().any(|t| t == "FAQPage") {
        return ContentType::FaqPage;
    }
    if types.iter().any(|t| t == "Article" || t == "BlogPosting") || page.has_article {
        let long_and_structured = page.word_count() >= PILLAR_UPGRADE_WORDS
            && page.heading_count(&[2, 3]) >= PILLAR_MIN_SUBHEADINGS;
        return if long_and_structured { ContentType::PillarPage } else { ContentType::BlogPost };
    }

    if page.word_count() >= PILLAR_GENERIC_WORDS
        && page.heading_count(&[2, 3]) >= PILLAR_MIN_SUBHEADINGS
    {
        return ContentType::PillarPage;
    }
    if page.heading_count(&[1]) == 1 && text.to_lowercase().contains("get a quote") {
        return ContentType::ServicePage;
    }
    if matches!(page.url.path(), "" | "/" | "/home" | "/index.html") {
        return ContentType::HomePage;
    }

    ContentType::LandingPage
}
