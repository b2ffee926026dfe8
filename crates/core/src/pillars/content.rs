//! Content quality & relevance pillar.
//!
//! Six sub-scores, each checked against the audited page's content-type
//! thresholds: word count, primary-keyword density, keyword placement,
//! related-term (LSI) coverage, readability, and originality. Originality
//! is the one excludable input — when no percentage is supplied its three
//! points leave the pillar's available total entirely, unlike missing LSI
//! terms which simply earn zero credit.

use crate::page::Page;
use crate::report::{Pillar, PillarResult};
use crate::text::{flesch_reading_ease, keyword_occurrences, round2};
use crate::ContentType;

/// Partial credit is granted within this fraction outside the ideal
/// word-count range.
const WORD_COUNT_TOLERANCE: f64 = 0.15;

/// Partial credit is granted within this many absolute percentage points
/// of either density bound.
const DENSITY_TOLERANCE: f64 = 0.2;

/// Scores the content pillar. Pure: consumes only the page snapshot and
/// the caller-supplied keyword inputs.
pub fn score_content(
    content_type: ContentType,
    page: &Page,
    primary_keyword: &str,
    lsi_terms: &[String],
    originality: Option<f64>,
) -> PillarResult {
    let mut result = PillarResult::new(Pillar::Content, 0.0);
    let text = &page.visible_text;
    let keyword = primary_keyword.trim();
    let word_count = page.word_count();

    result.detail("Word Count", word_count);
    score_word_count(&mut result, content_type, word_count);
    score_density(&mut result, content_type, text, keyword, word_count);
    score_placement(&mut result, page, keyword);
    score_lsi(&mut result, content_type, text, lsi_terms, word_count);
    score_readability(&mut result, content_type, text);
    score_originality(&mut result, originality);

    result
}

fn score_word_count(result: &mut PillarResult, content_type: ContentType, word_count: usize) {
    result.available += 3.0;
    let (low, high) = content_type.ideal_word_range();
    let wc = word_count as f64;

    if word_count >= low && word_count <= high {
        result.score += 3.0;
        result.detail("Word Count Score", "3 / 3");
    } else if wc >= low as f64 * (1.0 - WORD_COUNT_TOLERANCE)
        && wc <= high as f64 * (1.0 + WORD_COUNT_TOLERANCE)
    {
        result.score += 2.0;
        result.detail("Word Count Score", "2 / 3");
        result.suggest(format!("Adjust word count toward {}-{} words.", low, high));
    } else {
        result.detail("Word Count Score", "0 / 3");
        result.suggest(format!("Word count far from ideal ({}-{}).", low, high));
    }
}

fn score_density(
    result: &mut PillarResult,
    content_type: ContentType,
    text: &str,
    keyword: &str,
    word_count: usize,
) {
    result.available += 3.0;
    let density = if !keyword.is_empty() && word_count > 0 {
        (keyword_occurrences(text, keyword) as f64 / word_count as f64) * 100.0
    } else {
        0.0
    };
    result.detail("Keyword Density (%)", round2(density));

    let (low, high) = content_type.density_range();
    if density >= low && density <= high {
        result.score += 3.0;
        result.detail("Keyword Density Score", "3 / 3");
    } else if density >= low - DENSITY_TOLERANCE && density <= high + DENSITY_TOLERANCE {
        result.score += 2.0;
        result.detail("Keyword Density Score", "2 / 3");
        result.suggest(format!("Align keyword density to {}-{}%.", low, high));
    } else {
        result.detail("Keyword Density Score", "0 / 3");
        result.suggest(format!("Keyword density outside {}-{}%.", low, high));
    }
}

fn score_placement(result: &mut PillarResult, page: &Page, keyword: &str) {
    result.available += 5.0;
    let mut placement = 0.0;

    if !keyword.is_empty() {
        let needle = keyword.to_lowercase();
        let intro = page
            .visible_text
            .split_whitespace()
            .take(100)
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        if page
            .title
            .as_ref()
            .is_some_and(|t| t.to_lowercase().contains(&needle))
        {
            placement += 1.0;
        }
        if page
            .meta_description
            .as_ref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
        {
            placement += 1.0;
        }
        if intro.contains(&needle) {
            placement += 1.0;
        }
        if page
            .heading_texts(1)
            .iter()
            .any(|h| h.to_lowercase().contains(&needle))
        {
            placement += 1.0;
        }
        if page
            .subheading_texts()
            .iter()
            .any(|h| h.to_lowercase().contains(&needle))
        {
            placement += 1.0;
        }
    }

    result.score += placement;
    result.detail("Keyword Placement Score", format!("{} / 5", placement));
    if placement < 5.0 {
        result.suggest(
            "Place primary keyword in title, meta description, intro, H1 and at least one H2/H3.",
        );
    }
}

fn score_lsi(
    result: &mut PillarResult,
    content_type: ContentType,
    text: &str,
    lsi_terms: &[String],
    word_count: usize,
) {
    result.available += 3.0;
    let terms: Vec<&str> = lsi_terms
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();

    let lsi_score = if terms.is_empty() {
        result.detail("LSI Target", "N/A (no terms provided)");
        result.suggest("Provide a list of LSI/related terms for stronger topical coverage.");
        0.0
    } else {
        let hits = terms
            .iter()
            .filter(|t| keyword_occurrences(text, t) > 0)
            .count();
        let per_term = content_type.lsi_words_per_term();
        let target = ((word_count as f64 / per_term as f64).round() as usize).max(1);
        let coverage = hits as f64 / target as f64;

        result.detail("LSI Target", target);
        result.detail("LSI Hits", hits);
        if coverage < 1.0 {
            result.suggest(format!(
                "Add more related terms (target ≈ {}, found {}).",
                target, hits
            ));
        }

        if coverage >= 1.0 {
            3.0
        } else if coverage >= 0.7 {
            2.0
        } else {
            0.0
        }
    };

    result.score += lsi_score;
    result.detail("LSI Score", format!("{} / 3", lsi_score));
}

fn score_readability(result: &mut PillarResult, content_type: ContentType, text: &str) {
    result.available += 3.0;
    let reading_ease = flesch_reading_ease(text);
    result.detail("Flesch Reading Ease", reading_ease);

    let threshold = content_type.readability_threshold();
    if reading_ease >= threshold {
        result.score += 3.0;
        result.detail("Readability Score", "3 / 3");
    } else if reading_ease >= threshold - 10.0 {
        result.score += 2.0;
        result.detail("Readability Score", "2 / 3");
        result.suggest(format!(
            "Improve readability to ≥ {} (shorter sentences, simpler words).",
            threshold
        ));
    } else {
        result.detail("Readability Score", "0 / 3");
        result.suggest(format!("Low readability ({}). Aim for ≥ {}.", reading_ease, threshold));
    }
}

fn score_originality(result: &mut PillarResult, originality: Option<f64>) {
    result.available += 3.0;
    match originality {
        None => {
            // No percentage supplied: drop the sub-score from the
            // denominator instead of penalizing with a zero.
            result.detail("Originality Score", "Excluded (no % provided)");
            result.available -= 3.0;
        }
        Some(pct) if pct >= 95.0 => {
            result.score += 3.0;
            result.detail("Originality Score", format!("3 / 3 ({}%)", pct));
        }
        Some(pct) if pct >= 85.0 => {
            result.score += 2.0;
            result.detail("Originality Score", format!("2 / 3 ({}%)", pct));
            result.suggest("Increase originality to ≥ 95%.");
        }
        Some(pct) => {
            result.detail("Originality Score", format!("0 / 3 ({}%)", pct));
            result.suggest("Originality too low; rewrite to avoid duplication.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use url::Url;

    fn page_with_text(words: usize, keyword_reps: usize) -> Page {
        let mut body = String::new();
        for _ in 0..keyword_reps {
            body.push_str("garden tools ");
        }
        let filler = words.saturating_sub(keyword_reps * 2);
        for _ in 0..filler {
            body.push_str("plant ");
        }
        let html = format!(
            "<html><head><title>Garden tools guide</title>\
             <meta name=\"description\" content=\"All about garden tools here.\"></head>\
             <body><h1>Garden tools</h1><h2>Garden tools care</h2><p>{}</p></body></html>",
            body
        );
        Page::from_html(&html, Url::parse("https://example.com/blog/garden").unwrap())
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
    #[case(1200, "3 / 3")] // inside the Blog Post ideal range
    #[case(2000, "3 / 3")]
    #[case(1020, "2 / 3")] // exactly at the -15% boundary
    #[case(2300, "2 / 3")] // within the +15% boundary
    #[case(1019, "0 / 3")] // one word below the boundary
    #[case(100, "0 / 3")]
    fn test_word_count_bands(#[case] words: usize, #[case] expected: &str) {
        let mut result = PillarResult::new(Pillar::Content, 0.0);
        score_word_count(&mut result, ContentType::BlogPost, words);
        assert_eq!(find_detail(&result, "Word Count Score"), expected);
    }

    #[test]
    fn test_density_arithmetic() {
        // Density must equal occurrences / word count × 100 to two decimals,
        // and ~1.6% sits inside the Blog Post 1.0-2.5 full-credit band.
        let page = page_with_text(1800, 27);
        let result = score_content(ContentType::BlogPost, &page, "garden tools", &[], None);

        let density: f64 = find_detail(&result, "Keyword Density (%)").parse().unwrap();
        let occurrences = keyword_occurrences(&page.visible_text, "garden tools") as f64;
        let expected = round2(occurrences / page.word_count() as f64 * 100.0);
        assert_eq!(density, expected);
        assert_eq!(find_detail(&result, "Keyword Density Score"), "3 / 3");
    }

    #[test]
    fn test_density_partial_band() {
        // Landing Page band is 0.5-1.2; a density of ~1.3 sits inside the
        // +0.2 partial band.
        let page = page_with_text(2500, 30);
        let result = score_content(ContentType::LandingPage, &page, "garden tools", &[], None);
        assert_eq!(find_detail(&result, "Keyword Density Score"), "2 / 3");
    }

    #[test]
    fn test_placement_full_credit() {
        let page = page_with_text(1500, 20);
        let result = score_content(ContentType::BlogPost, &page, "garden tools", &[], None);
        assert_eq!(find_detail(&result, "Keyword Placement Score"), "5 / 5");
    }

    #[test]
    fn test_placement_empty_keyword_scores_zero() {
        let page = page_with_text(1500, 20);
        let result = score_content(ContentType::BlogPost, &page, "", &[], None);
        assert_eq!(find_detail(&result, "Keyword Placement Score"), "0 / 5");
    }

    #[test]
    fn test_lsi_no_terms_keeps_available() {
        let page = page_with_text(1500, 10);
        let result = score_content(ContentType::BlogPost, &page, "garden tools", &[], None);

        assert_eq!(find_detail(&result, "LSI Score"), "0 / 3");
        assert_eq!(find_detail(&result, "LSI Target"), "N/A (no terms provided)");
        // Missing LSI terms zero the sub-score but never shrink the pillar:
        // 3+3+5+3+3 stay in the denominator, only originality's 3 left.
        assert_eq!(result.available, 17.0);
    }

    #[test]
    fn test_lsi_full_coverage() {
        let page = page_with_text(400, 10);
        // 400 words / 400 per term = 1 target term.
        let terms = vec!["plant".to_string()];
        let result = score_content(ContentType::BlogPost, &page, "garden tools", &terms, None);
        assert_eq!(find_detail(&result, "LSI Score"), "3 / 3");
    }

    #[rstest]
    #[case(None, 17.0)]
    #[case(Some(97.0), 20.0)]
    #[case(Some(90.0), 20.0)]
    #[case(Some(50.0), 20.0)]
    fn test_originality_exclusion_shrinks_available(
        #[case] originality: Option<f64>,
        #[case] expected_available: f64,
    ) {
        let page = page_with_text(1500, 20);
        let result =
            score_content(ContentType::BlogPost, &page, "garden tools", &[], originality);
        assert_eq!(result.available, expected_available);
    }

    #[rstest]
    #[case(ContentType::ProductPage)]
    #[case(ContentType::FaqPage)]
    #[case(ContentType::HomePage)]
    fn test_originality_exclusion_holds_across_types(#[case] content_type: ContentType) {
        let page = page_with_text(600, 5);
        let without = score_content(content_type, &page, "garden tools", &[], None);
        let with = score_content(content_type, &page, "garden tools", &[], Some(96.0));
        assert_eq!(with.available - without.available, 3.0);
    }

    #[rstest]
    #[case(Some(95.0), 3.0)]
    #[case(Some(94.9), 2.0)]
    #[case(Some(85.0), 2.0)]
    #[case(Some(84.9), 0.0)]
    fn test_originality_bands(#[case] originality: Option<f64>, #[case] points: f64) {
        let mut result = PillarResult::new(Pillar::Content, 0.0);
        score_originality(&mut result, originality);
        assert_eq!(result.score, points);
    }

    #[test]
    fn test_score_never_exceeds_available() {
        let page = page_with_text(1500, 25);
        let terms = vec!["plant".to_string(), "soil".to_string()];
        let result =
            score_content(ContentType::BlogPost, &page, "garden tools", &terms, Some(98.0));
        assert!(result.score <= result.available);
    }
}
