//! Mobile friendliness pillar.
//!
//! Viewport meta completeness, responsive CSS detection, tap-target and
//! spacing heuristics, base font size, and intrusive popup markers. The
//! stylesheet sample is fetched once and answers both the media-query and
//! the font-size questions.

use regex::Regex;
use reqwest::Client;

use crate::fetch::fetch_text;
use crate::page::Page;
use crate::report::{Pillar, PillarResult};

/// How many stylesheet links get fetched for CSS heuristics.
const STYLESHEET_SAMPLE: usize = 3;

/// Width-based breakpoints in a stylesheet mark the layout as responsive.
const MEDIA_QUERY_PATTERN: &str = r"(?i)@media\s*\(max-width|\(min-width";

/// A 16px font-size declaration anywhere in the sampled CSS.
const BASE_FONT_PATTERN: &str = r"(?i)font-size\s*:\s*1?6px";

/// Utility-class and unit fragments that hint at deliberate spacing.
const SPACING_HINT_PATTERN: &str = r"(?i)(gap-|padding|margin|px;|rem;)";

/// What the fetched stylesheet sample revealed.
#[derive(Debug, Clone, Copy, Default)]
pub struct MobileSignals {
    /// A sampled stylesheet contains a width-based media query.
    pub responsive_css: bool,
    /// A sampled stylesheet declares a 16px (or 6px-suffixed) font size.
    pub base_font_in_css: bool,
}

impl MobileSignals {
    /// Fetches up to [`STYLESHEET_SAMPLE`] stylesheets and scans each for
    /// both patterns. Fetch failures skip that stylesheet.
    pub async fn collect(client: &Client, page: &Page) -> Self {
        let media_re = Regex::new(MEDIA_QUERY_PATTERN).unwrap();
        let font_re = Regex::new(BASE_FONT_PATTERN).unwrap();
        let mut signals = Self::default();

        for href in page.stylesheets.iter().take(STYLESHEET_SAMPLE) {
            if signals.responsive_css && signals.base_font_in_css {
                break;
            }
            let Ok(resolved) = page.url.join(href) else { continue };
            let Some(css) = fetch_text(client, &resolved).await else { continue };

            signals.responsive_css |= media_re.is_match(&css);
            signals.base_font_in_css |= font_re.is_match(&css);
        }

        signals
    }
}

/// Scores the pillar from the page and gathered CSS signals. Pure.
pub fn score_mobile_observed(page: &Page, signals: &MobileSignals) -> PillarResult {
    let mut result = PillarResult::new(Pillar::Mobile, 30.0);

    score_viewport(&mut result, page);
    score_responsive_css(&mut result, signals);
    score_tap_targets(&mut result, page);
    score_tap_spacing(&mut result, page);
    score_font_size(&mut result, page, signals);
    score_popups(&mut result, page);

    result
}

/// Scores the pillar, fetching the stylesheet sample first.
pub async fn score_mobile(client: &Client, page: &Page) -> PillarResult {
    let signals = MobileSignals::collect(client, page).await;
    score_mobile_observed(page, &signals)
}

fn score_viewport(result: &mut PillarResult, page: &Page) {
    let content = page.viewport.as_deref().map(str::to_lowercase);
    result.detail("Viewport Meta", content.clone().unwrap_or_else(|| "Missing".into()));

    let has_width = content.as_deref().is_some_and(|c| c.contains("width=device-width"));
    let has_scale = content.as_deref().is_some_and(|c| c.contains("initial-scale=1"));

    if has_width && has_scale {
        result.score += 4.0;
        result.detail("Viewport Score", "4 / 4");
    } else if has_width || has_scale {
        result.score += 2.0;
        result.detail("Viewport Score", "2 / 4");
        result.suggest("Complete viewport tag: width=device-width, initial-scale=1.");
    } else {
        result.detail("Viewport Score", "0 / 4");
        result.suggest("Add viewport meta for mobile responsiveness.");
    }
}

fn score_responsive_css(result: &mut PillarResult, signals: &MobileSignals) {
    result.detail(
        "Responsive CSS (@media)",
        if signals.responsive_css { "Yes" } else { "Not detected" },
    );

    if signals.responsive_css {
        result.score += 6.0;
        result.detail("Responsive Score", "6 / 6");
    } else {
        result.detail("Responsive Score", "0 / 6");
        result.suggest("Add responsive CSS media queries.");
    }
}

fn score_tap_targets(result: &mut PillarResult, page: &Page) {
    result.detail("CTA/Tap Elements (count)", page.cta_count);

    if page.cta_count >= 3 {
        result.score += 3.0;
        result.detail("Tap Target Size Score", "3 / 5");
    } else {
        result.score += 1.0;
        result.detail("Tap Target Size Score", "1 / 5");
        result.suggest("Ensure tappable elements are ≥48px and well spaced on mobile.");
    }
}

fn score_tap_spacing(result: &mut PillarResult, page: &Page) {
    let spacing_re = Regex::new(SPACING_HINT_PATTERN).unwrap();
    let hint = spacing_re.is_match(&page.markup_sample);
    result.detail("Tap Spacing Hint", if hint { "Detected" } else { "Not detected" });

    if hint {
        result.score += 3.0;
        result.detail("Tap Spacing Score", "3 / 4");
    } else {
        result.score += 1.0;
        result.detail("Tap Spacing Score", "1 / 4");
        result.suggest("Increase spacing between links/buttons (≥8px).");
    }
}

fn score_font_size(result: &mut PillarResult, page: &Page, signals: &MobileSignals) {
    let inline = page
        .body_style
        .as_deref()
        .unwrap_or_default()
        .replace(' ', "")
        .to_lowercase()
        .contains("font-size:16px");
    let confirmed = inline || signals.base_font_in_css;
    result.detail("Font Base ≥16px", if confirmed { "Yes" } else { "Not confirmed" });

    if confirmed {
        result.score += 4.0;
        result.detail("Font Size Score", "4 / 5");
    } else {
        result.score += 2.0;
        result.detail("Font Size Score", "2 / 5");
        result.suggest("Ensure body text is 16–22px on mobile; ≥90% readable.");
    }
}

fn score_popups(result: &mut PillarResult, page: &Page) {
    result.detail("Popup Detected", if page.has_popup_markers { "Yes" } else { "No" });

    if page.has_popup_markers {
        result.score += 3.0;
        result.detail("Popup Score", "3 / 6");
        result.suggest("Delay interstitials ≥3s, keep ≤25% viewport, trigger on user action.");
    } else {
        result.score += 6.0;
        result.detail("Popup Score", "6 / 6");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use url::Url;

    fn page(html: &str) -> Page {
        Page::from_html(html, Url::parse("https://example.com/x").unwrap())
    }

    fn find_detail<'a>(result: &'a PillarResult, label: &str) -> &'a str {
        result
            .details
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
            .expect("detail present")
    }

    #[rstest]
    #[case("width=device-width, initial-scale=1", "4 / 4")]
    #[case("width=device-width, initial-scale=1.0", "4 / 4")]
    #[case("width=device-width", "2 / 4")]
    #[case("initial-scale=1", "2 / 4")]
    #[case("user-scalable=no", "0 / 4")]
    fn test_viewport_bands(#[case] content: &str, #[case] expected: &str) {
        let html = format!("<meta name=\"viewport\" content=\"{}\">", content);
        let result = score_mobile_observed(&page(&html), &MobileSignals::default());
        assert_eq!(find_detail(&result, "Viewport Score"), expected);
    }

    #[test]
    fn test_missing_viewport() {
        let result = score_mobile_observed(&page("<p>plain</p>"), &MobileSignals::default());
        assert_eq!(find_detail(&result, "Viewport Meta"), "Missing");
        assert_eq!(find_detail(&result, "Viewport Score"), "0 / 4");
    }

    #[test]
    fn test_responsive_css_signal() {
        let p = page("<p>x</p>");
        let with = MobileSignals { responsive_css: true, ..Default::default() };
        let result = score_mobile_observed(&p, &with);
        assert_eq!(find_detail(&result, "Responsive Score"), "6 / 6");

        let result = score_mobile_observed(&p, &MobileSignals::default());
        assert_eq!(find_detail(&result, "Responsive Score"), "0 / 6");
    }

    #[test]
    fn test_media_query_pattern() {
        let media_re = Regex::new(MEDIA_QUERY_PATTERN).unwrap();
        assert!(media_re.is_match("@media (max-width: 600px) { body {} }"));
        assert!(media_re.is_match("@media screen and (min-width: 40em) {}"));
        assert!(!media_re.is_match("body { color: red; }"));
    }

    #[rstest]
    #[case("<button>a</button><button>b</button><button>c</button>", "3 / 5")]
    #[case("<a class=\"btn primary\">x</a><button>y</button><input class=\"btn\">", "3 / 5")]
    #[case("<button>only</button>", "1 / 5")]
    #[case("<p>none</p>", "1 / 5")]
    fn test_tap_target_bands(#[case] body: &str, #[case] expected: &str) {
        let result = score_mobile_observed(&page(body), &MobileSignals::default());
        assert_eq!(find_detail(&result, "Tap Target Size Score"), expected);
    }

    #[test]
    fn test_tap_spacing_hint() {
        let spaced = page(r#"<div style="padding: 8px">x</div>"#);
        let result = score_mobile_observed(&spaced, &MobileSignals::default());
        assert_eq!(find_detail(&result, "Tap Spacing Score"), "3 / 4");

        let flat = page("<div>x</div>");
        let result = score_mobile_observed(&flat, &MobileSignals::default());
        assert_eq!(find_detail(&result, "Tap Spacing Score"), "1 / 4");
    }

    #[test]
    fn test_font_size_from_inline_style() {
        let styled = page(r#"<body style="font-size: 16px">text</body>"#);
        let result = score_mobile_observed(&styled, &MobileSignals::default());
        assert_eq!(find_detail(&result, "Font Base ≥16px"), "Yes");
        assert_eq!(find_detail(&result, "Font Size Score"), "4 / 5");
    }

    #[test]
    fn test_font_size_from_css_signal() {
        let p = page("<body>text</body>");
        let signals = MobileSignals { base_font_in_css: true, ..Default::default() };
        let result = score_mobile_observed(&p, &signals);
        assert_eq!(find_detail(&result, "Font Size Score"), "4 / 5");

        let result = score_mobile_observed(&p, &MobileSignals::default());
        assert_eq!(find_detail(&result, "Font Size Score"), "2 / 5");
    }

    #[rstest]
    #[case(r#"<div role="dialog">subscribe!</div>"#, "3 / 6")]
    #[case(r#"<div class="newsletter-popup">subscribe!</div>"#, "3 / 6")]
    #[case(r#"<div class="content">article</div>"#, "6 / 6")]
    fn test_popup_bands(#[case] body: &str, #[case] expected: &str) {
        let result = score_mobile_observed(&page(body), &MobileSignals::default());
        assert_eq!(find_detail(&result, "Popup Score"), expected);
    }

    #[test]
    fn test_well_built_page_scores_high() {
        let html = r#"
            <meta name="viewport" content="width=device-width, initial-scale=1">
            <body style="font-size:16px; padding: 1rem;">
              <button>One</button><button>Two</button><button>Three</button>
            </body>
        "#;
        let signals = MobileSignals { responsive_css: true, base_font_in_css: false };
        let result = score_mobile_observed(&page(html), &signals);
        // 4 + 6 + 3 + 3 + 4 + 6: the heuristic ceiling for tap scores
        // keeps this below the full 30.
        assert_eq!(result.score, 26.0);
        assert_eq!(result.available, 30.0);
    }
}
