//! Owned snapshot of one fetched page.
//!
//! A [`Page`] is built once per audit run from a parsed [`Document`] and is
//! immutable afterwards. Every pillar scorer receives the same snapshot by
//! reference, so no scorer ever re-parses HTML or shares hidden state with
//! another. Holding owned data (rather than borrowed DOM nodes) also keeps
//! the audit future `Send` across the network calls the link, performance,
//! and mobile pillars make.

use regex::Regex;
use serde_json::Value;
use url::Url;

use crate::parse::Document;

/// Class-name markers that suggest an intrusive dialog or overlay.
const POPUP_CLASS_PATTERN: &str = r"(?i)(modal|popup|overlay)";

/// Visible-text extraction strips these elements before collecting text.
/// Script/style carry no copy; nav/footer/aside are boilerplate noise.
const STRIPPED_TAGS: [&str; 6] = ["script", "style", "noscript", "nav", "footer", "aside"];

/// Serialized markup kept for regex heuristics is capped at this many chars.
const MARKUP_SAMPLE_LIMIT: usize = 200_000;

/// A heading element with its level (1-6) and text content.
#[derive(Debug, Clone)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

/// An `<img>` element as seen by the scorers.
#[derive(Debug, Clone)]
pub struct ImageRef {
    /// Resolved from `src`, falling back to `data-src` for lazy loaders.
    pub src: Option<String>,
    /// Alt text, if present.
    pub alt: Option<String>,
    /// Whether both `width` and `height` attributes are set and non-empty.
    pub has_dimensions: bool,
}

impl ImageRef {
    /// Whether the image carries non-empty alt text.
    pub fn has_alt(&self) -> bool {
        self.alt.as_ref().is_some_and(|a| !a.trim().is_empty())
    }
}

/// Immutable snapshot of everything the pillar scorers read from a page.
///
/// Created by [`Page::from_document`] (or [`Page::from_html`]) once per
/// audit; discarded when the run's [`crate::AuditResult`] has been built.
#[derive(Debug, Clone)]
pub struct Page {
    /// The audited URL, used for link resolution and URL-shape checks.
    pub url: Url,
    /// `<title>` text.
    pub title: Option<String>,
    /// `meta[name=description]` content.
    pub meta_description: Option<String>,
    /// `meta[name=viewport]` content.
    pub viewport: Option<String>,
    /// `link[rel=canonical]` href.
    pub canonical: Option<String>,
    /// All h1-h6 elements in document order.
    pub headings: Vec<Heading>,
    /// Every `a[href]` value in document order, unresolved.
    pub anchor_hrefs: Vec<String>,
    /// All `<img>` elements in document order.
    pub images: Vec<ImageRef>,
    /// Hrefs of `link[rel~=stylesheet]` elements.
    pub stylesheets: Vec<String>,
    /// Total byte length of inline `<script>` bodies.
    pub inline_script_bytes: usize,
    /// Count of `<script src=…>` references.
    pub external_script_count: usize,
    /// Parsed JSON-LD items, top-level arrays flattened.
    pub structured_data: Vec<Value>,
    /// Whether the page contains an `<article>` element.
    pub has_article: bool,
    /// Whether dialog/modal/popup/overlay markers were found.
    pub has_popup_markers: bool,
    /// Count of probable tap targets (`<button>` or `btn`-classed elements).
    pub cta_count: usize,
    /// Inline `style` attribute of `<body>`, if any.
    pub body_style: Option<String>,
    /// Serialized markup, capped, for spacing-hint regexes.
    pub markup_sample: String,
    /// Boilerplate-stripped, whitespace-normalized page text.
    pub visible_text: String,
}

impl Page {
    /// Parses HTML and builds a snapshot in one step.
    pub fn from_html(html: &str, url: Url) -> Self {
        let doc = Document::parse(html);
        Self::from_document(&doc, html, url)
    }

    /// Builds a snapshot from an already-parsed document.
    ///
    /// The raw HTML is needed alongside the document because visible text
    /// is extracted through a streaming rewrite of the original markup.
    pub fn from_document(doc: &Document, html: &str, url: Url) -> Self {
        let headings = doc
            .select("h1, h2, h3, h4, h5, h6")
            .unwrap_or_default()
            .iter()
            .filter_map(|el| {
                let level = el.tag_name().strip_prefix('h')?.parse::<u8>().ok()?;
                Some(Heading { level, text: el.text().trim().to_string() })
            })
            .collect();

        let anchor_hrefs = doc
            .select("a[href]")
            .unwrap_or_default()
            .iter()
            .filter_map(|el| el.attr("href").map(|h| h.to_string()))
            .collect();

        let images = doc
            .select("img")
            .unwrap_or_default()
            .iter()
            .map(|el| ImageRef {
                src: el
                    .attr("src")
                    .or_else(|| el.attr("data-src"))
                    .map(|s| s.to_string()),
                alt: el.attr("alt").map(|s| s.to_string()),
                has_dimensions: has_attr(el.attr("width")) && has_attr(el.attr("height")),
            })
            .collect();

        let mut stylesheets = Vec::new();
        let mut canonical = None;
        for link in doc.select("link[href]").unwrap_or_default() {
            let rel = link.attr("rel").unwrap_or_default().to_lowercase();
            let href = link.attr("href").unwrap_or_default();
            if rel.split_whitespace().any(|r| r == "stylesheet") {
                stylesheets.push(href.to_string());
            }
            if rel.contains("canonical") && canonical.is_none() && !href.is_empty() {
                canonical = Some(href.to_string());
            }
        }

        let mut inline_script_bytes = 0;
        let mut external_script_count = 0;
        for script in doc.select("script").unwrap_or_default() {
            if script.attr("src").is_some() {
                external_script_count += 1;
            } else {
                inline_script_bytes += script.text().len();
            }
        }

        let popup_re = Regex::new(POPUP_CLASS_PATTERN).unwrap();
        let has_popup_markers = !doc.select("[role=\"dialog\"]").unwrap_or_default().is_empty()
            || doc
                .select("[class]")
                .unwrap_or_default()
                .iter()
                .any(|el| popup_re.is_match(el.attr("class").unwrap_or_default()));

        let cta_count = doc
            .select("button, a, input")
            .unwrap_or_default()
            .iter()
            .filter(|el| {
                el.tag_name() == "button"
                    || el.attr("class").unwrap_or_default().to_lowercase().contains("btn")
            })
            .count();

        let markup = doc.as_string();
        let markup_sample = if markup.len() > MARKUP_SAMPLE_LIMIT {
            markup.chars().take(MARKUP_SAMPLE_LIMIT).collect()
        } else {
            markup
        };

        Self {
            url,
            title: doc.title().map(|t| t.trim().to_string()),
            meta_description: doc.meta_content("description").map(|d| d.trim().to_string()),
            viewport: doc.meta_content("viewport"),
            canonical,
            headings,
            anchor_hrefs,
            images,
            stylesheets,
            inline_script_bytes,
            external_script_count,
            structured_data: extract_json_ld(doc),
            has_article: !doc.select("article").unwrap_or_default().is_empty(),
            has_popup_markers,
            cta_count,
            body_style: doc
                .select("body")
                .unwrap_or_default()
                .first()
                .and_then(|b| b.attr("style").map(|s| s.to_string())),
            markup_sample,
            visible_text: visible_text(html),
        }
    }

    /// Texts of headings at the given level.
    pub fn heading_texts(&self, level: u8) -> Vec<&str> {
        self.headings
            .iter()
            .filter(|h| h.level == level)
            .map(|h| h.text.as_str())
            .collect()
    }

    /// Number of headings at the given levels.
    pub fn heading_count(&self, levels: &[u8]) -> usize {
        self.headings.iter().filter(|h| levels.contains(&h.level)).count()
    }

    /// Texts of h2 and h3 headings, in document order.
    pub fn subheading_texts(&self) -> Vec<&str> {
        self.headings
            .iter()
            .filter(|h| h.level == 2 || h.level == 3)
            .map(|h| h.text.as_str())
            .collect()
    }

    /// All `@type` values declared across the page's JSON-LD items.
    ///
    /// Handles both the string and array forms of `@type`.
    pub fn json_ld_types(&self) -> Vec<String> {
        let mut types = Vec::new();
        for item in &self.structured_data {
            match item.get("@type") {
                Some(Value::String(t)) => types.push(t.clone()),
                Some(Value::Array(list)) => {
                    types.extend(list.iter().filter_map(|v| v.as_str().map(|s| s.to_string())));
                }
                _ => {}
            }
        }
        types
    }

    /// Word count of the visible text.
    pub fn word_count(&self) -> usize {
        crate::text::count_words(&self.visible_text)
    }
}

fn has_attr(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Extracts JSON-LD items from `script[type="application/ld+json"]` blocks.
///
/// Top-level arrays are flattened into individual items; blocks that fail
/// to parse are skipped.
fn extract_json_ld(doc: &Document) -> Vec<Value> {
    let mut items = Vec::new();
    for script in doc
        .select("script[type=\"application/ld+json\"]")
        .unwrap_or_default()
    {
        match serde_json::from_str::<Value>(script.text().trim()) {
            Ok(Value::Array(list)) => items.extend(list),
            Ok(value) => items.push(value),
            Err(_) => continue,
        }
    }
    items
}

/// Extracts the boilerplate-stripped visible text of a page.
///
/// Streams the markup through lol_html removing script, style, noscript,
/// nav, footer, and aside subtrees, then collects the remaining text nodes
/// and normalizes whitespace.
pub fn visible_text(html: &str) -> String {
    let mut output = String::with_capacity(html.len());
    let handlers = STRIPPED_TAGS
        .iter()
        .map(|tag| {
            lol_html::element!(*tag, |el| {
                el.remove();
                Ok(())
            })
        })
        .collect();

    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings { element_content_handlers: handlers, ..Default::default() },
        |c: &[u8]| {
            output.push_str(&String::from_utf8_lossy(c));
        },
    );

    // Rewriter failure degrades to the unstripped markup.
    match rewriter.write(html.as_bytes()) {
        Ok(()) => {}
        Err(_) => return collect_text(html),
    }
    match rewriter.end() {
        Ok(()) => {}
        Err(_) => return collect_text(html),
    }

    collect_text(&output)
}

/// Joins text nodes with single spaces and collapses runs of whitespace.
fn collect_text(html: &str) -> String {
    let doc = scraper::Html::parse_document(html);
    let joined = doc.root_element().text().collect::<Vec<_>>().join(" ");
    let ws_re = Regex::new(r"\s+").unwrap();
    ws_re.replace_all(joined.trim(), " ").to_string()
}
