//! HTML tag optimization pillar.
//!
//! Checks the classic on-page tags against fixed bands: title length,
//! meta-description length, a single H1, enough subheadings for the
//! content type, image alt-text coverage, and a JSON-LD type matching the
//! content type's expected schema list. Ten points available, always.

use crate::page::Page;
use crate::report::{Pillar, PillarResult};
use crate::ContentType;

/// Scores the HTML tag pillar. Pure.
pub fn score_html_tags(content_type: ContentType, page: &Page) -> PillarResult {
    let mut result = PillarResult::new(Pillar::HtmlTags, 10.0);

    score_title(&mut result, page);
    score_meta_description(&mut result, page);
    score_h1(&mut result, page);
    score_subheadings(&mut result, content_type, page);
    score_alt_coverage(&mut result, page);
    score_schema(&mut result, content_type, page);

    result
}

fn score_title(result: &mut PillarResult, page: &Page) {
    let length = page.title.as_deref().unwrap_or_default().chars().count();
    result.detail("Title Length", length);

    if length >= 10 && length <= 60 {
        result.score += 1.0;
        result.detail("Title Score", "1 / 1");
    } else if (61..=65).contains(&length) || (8..=9).contains(&length) {
        result.score += 0.5;
        result.detail("Title Score", "0.5 / 1");
        result.suggest("Adjust title to ≤ 60 chars and descriptive.");
    } else {
        result.detail("Title Score", "0 / 1");
        result.suggest("Fix title: missing or outside ideal length.");
    }
}

fn score_meta_description(result: &mut PillarResult, page: &Page) {
    let length = page
        .meta_description
        .as_deref()
        .unwrap_or_default()
        .chars()
        .count();
    result.detail("Meta Description Length", length);

    if (150..=160).contains(&length) {
        result.score += 1.0;
        result.detail("Meta Description Score", "1 / 1");
    } else if (140..=170).contains(&length) {
        result.score += 0.5;
        result.detail("Meta Description Score", "0.5 / 1");
        result.suggest("Refine meta to 150-160 chars with primary keyword.");
    } else {
        result.detail("Meta Description Score", "0 / 1");
        result.suggest("Add a meta description (150-160 chars).");
    }
}

fn score_h1(result: &mut PillarResult, page: &Page) {
    let count = page.heading_count(&[1]);
    result.detail("H1 Count", count);

    if count == 1 {
        result.score += 2.0;
        result.detail("H1 Score", "2 / 2");
    } else if count > 1 {
        result.score += 1.0;
        result.detail("H1 Score", "1 / 2");
        result.suggest("Use exactly one H1.");
    } else {
        result.detail("H1 Score", "0 / 2");
        result.suggest("Add a descriptive H1.");
    }
}

fn score_subheadings(result: &mut PillarResult, content_type: ContentType, page: &Page) {
    let needed = content_type.min_subheadings();
    let count = page.heading_count(&[2, 3, 4]);
    result.detail("H2+ Count", count);

    if count >= needed {
        result.score += 2.0;
        result.detail("H2+ Score", "2 / 2");
    } else if count == needed.saturating_sub(1) {
        // Exactly one short of the target.
        result.score += 1.0;
        result.detail("H2+ Score", "1 / 2");
        result.suggest(format!("Add more subheadings (target ≥ {}).", needed));
    } else {
        result.detail("H2+ Score", "0 / 2");
        result.suggest(format!("Add subheadings (need ≥ {}).", needed));
    }
}

fn score_alt_coverage(result: &mut PillarResult, page: &Page) {
    // A page with no images has nothing to caption: full coverage.
    let coverage = if page.images.is_empty() {
        100.0
    } else {
        let with_alt = page.images.iter().filter(|i| i.has_alt()).count();
        crate::text::round2(100.0 * with_alt as f64 / page.images.len() as f64)
    };
    result.detail("Alt Coverage %", coverage);

    if coverage >= 90.0 {
        result.score += 2.0;
        result.detail("Alt Score", "2 / 2");
    } else if coverage >= 70.0 {
        result.score += 1.0;
        result.detail("Alt Score", "1 / 2");
        result.suggest("Increase image alt coverage to ≥ 90%.");
    } else {
        result.detail("Alt Score", "0 / 2");
        result.suggest("Add descriptive alt text to images.");
    }
}

fn score_schema(result: &mut PillarResult, content_type: ContentType, page: &Page) {
    let expected = content_type.expected_schema_types();
    let found = page.json_ld_types();
    result.detail(
        "Schema Found",
        if found.is_empty() { "None".to_string() } else { found.join(", ") },
    );

    if found.iter().any(|t| expected.contains(&t.as_str())) {
        result.score += 2.0;
        result.detail("Schema Score", "2 / 2");
    } else if !found.is_empty() {
        result.score += 1.0;
        result.detail("Schema Score", "1 / 2");
        result.suggest(format!("Adjust schema to {}.", expected.join(", ")));
    } else {
        result.detail("Schema Score", "0 / 2");
        result.suggest(format!("Add structured data ({}).", expected.join(", ")));
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
    #[case("Best Garden Tools 2024", "1 / 1")] // inside the 10-60 band
    #[case("Tools now", "0.5 / 1")] // 9 chars, lower boundary band
    #[case("Hi", "0 / 1")]
    #[case("", "0 / 1")]
    fn test_title_bands(#[case] title: &str, #[case] expected: &str) {
        let html = format!("<title>{}</title>", title);
        let result = score_html_tags(ContentType::BlogPost, &page(&html));
        assert_eq!(find_detail(&result, "Title Score"), expected);
    }

    #[test]
    fn test_title_upper_boundary_band() {
        let html = format!("<title>{}</title>", "x".repeat(63));
        let result = score_html_tags(ContentType::BlogPost, &page(&html));
        assert_eq!(find_detail(&result, "Title Score"), "0.5 / 1");
    }

    #[rstest]
    #[case(155, "1 / 1")]
    #[case(150, "1 / 1")]
    #[case(160, "1 / 1")]
    #[case(145, "0.5 / 1")]
    #[case(170, "0.5 / 1")]
    #[case(171, "0 / 1")]
    #[case(0, "0 / 1")]
    fn test_meta_description_bands(#[case] length: usize, #[case] expected: &str) {
        let html = format!("<meta name=\"description\" content=\"{}\">", "d".repeat(length));
        let result = score_html_tags(ContentType::BlogPost, &page(&html));
        assert_eq!(find_detail(&result, "Meta Description Score"), expected);
    }

    #[rstest]
    #[case("<h1>One</h1>", "2 / 2")]
    #[case("<h1>One</h1><h1>Two</h1>", "1 / 2")]
    #[case("<p>none</p>", "0 / 2")]
    fn test_h1_bands(#[case] body: &str, #[case] expected: &str) {
        let result = score_html_tags(ContentType::BlogPost, &page(body));
        assert_eq!(find_detail(&result, "H1 Score"), expected);
    }

    #[test]
    fn test_subheading_bands() {
        // Blog Post needs 2 subheadings; h4 counts toward the total.
        let full = page("<h2>a</h2><h4>b</h4>");
        let result = score_html_tags(ContentType::BlogPost, &full);
        assert_eq!(find_detail(&result, "H2+ Score"), "2 / 2");

        let one_short = page("<h2>a</h2>");
        let result = score_html_tags(ContentType::BlogPost, &one_short);
        assert_eq!(find_detail(&result, "H2+ Score"), "1 / 2");

        let none = page("<p>flat</p>");
        let result = score_html_tags(ContentType::BlogPost, &none);
        assert_eq!(find_detail(&result, "H2+ Score"), "0 / 2");
    }

    #[test]
    fn test_zero_images_full_alt_credit() {
        let result = score_html_tags(ContentType::BlogPost, &page("<p>no images</p>"));
        assert_eq!(find_detail(&result, "Alt Coverage %"), "100");
        assert_eq!(find_detail(&result, "Alt Score"), "2 / 2");
    }

    #[rstest]
    #[case(9, 10, "2 / 2")] // 90%
    #[case(8, 10, "1 / 2")] // 80%
    #[case(5, 10, "0 / 2")] // 50%
    fn test_alt_coverage_bands(#[case] with_alt: usize, #[case] total: usize, #[case] expected: &str) {
        let mut body = String::new();
        for i in 0..total {
            if i < with_alt {
                body.push_str("<img src=\"/a.jpg\" alt=\"pic\">");
            } else {
                body.push_str("<img src=\"/a.jpg\">");
            }
        }
        let result = score_html_tags(ContentType::BlogPost, &page(&body));
        assert_eq!(find_detail(&result, "Alt Score"), expected);
    }

    #[test]
    fn test_schema_bands() {
        let matching = page(r#"<script type="application/ld+json">{"@type": "BlogPosting"}</script>"#);
        let result = score_html_tags(ContentType::BlogPost, &matching);
        assert_eq!(find_detail(&result, "Schema Score"), "2 / 2");

        let wrong_type = page(r#"<script type="application/ld+json">{"@type": "Recipe"}</script>"#);
        let result = score_html_tags(ContentType::BlogPost, &wrong_type);
        assert_eq!(find_detail(&result, "Schema Score"), "1 / 2");

        let absent = page("<p>nothing structured</p>");
        let result = score_html_tags(ContentType::BlogPost, &absent);
        assert_eq!(find_detail(&result, "Schema Score"), "0 / 2");
    }

    #[test]
    fn test_available_is_fixed() {
        let result = score_html_tags(ContentType::FaqPage, &page("<p>bare</p>"));
        assert_eq!(result.available, 10.0);
        assert!(result.score <= result.available);
    }
}
