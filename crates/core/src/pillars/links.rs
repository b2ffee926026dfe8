//! URL & link structure pillar.
//!
//! URL shape (length, keyword tokens in the slug), canonical tag presence,
//! internal/external link balance, and a broken-link sample check over the
//! first [`BROKEN_LINK_SAMPLE`] anchors. The probes are the only network
//! traffic here; every probe failure just counts that one link as broken.

use std::collections::HashSet;

use reqwest::Client;
use url::Url;

use crate::fetch::probe;
use crate::page::Page;
use crate::report::{Pillar, PillarResult};
use crate::text::tokens;

/// How many anchors the broken-link check probes.
pub const BROKEN_LINK_SAMPLE: usize = 15;

/// Internal/external anchor counts for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkCounts {
    pub internal: usize,
    pub external: usize,
}

/// Classifies every anchor as internal or external.
///
/// Fragment-only and `javascript:` hrefs are skipped; the rest resolve
/// against the page URL and compare hosts. Unresolvable hrefs count as
/// external (they certainly don't point at this site).
pub fn count_links(page: &Page) -> LinkCounts {
    let mut counts = LinkCounts { internal: 0, external: 0 };
    let own_host = page.url.host_str();

    for href in &page.anchor_hrefs {
        if href.starts_with('#') || href.to_lowercase().starts_with("javascript:") {
            continue;
        }
        match page.url.join(href) {
            Ok(resolved) if resolved.host_str() == own_host && own_host.is_some() => {
                counts.internal += 1;
            }
            _ => counts.external += 1,
        }
    }
    counts
}

/// Number of unique tokens shared between the URL path and the keyword.
pub fn slug_keyword_overlap(url: &Url, keyword: &str) -> usize {
    let slug: HashSet<String> = tokens(url.path()).into_iter().collect();
    let kw: HashSet<String> = tokens(keyword).into_iter().collect();
    slug.intersection(&kw).count()
}

/// Probes the first [`BROKEN_LINK_SAMPLE`] anchors and counts failures.
///
/// A link is broken when its href cannot resolve, the probe cannot reach
/// it, or the response status is 400 or higher.
pub async fn count_broken_links(client: &Client, page: &Page) -> usize {
    let mut broken = 0;
    for href in page.anchor_hrefs.iter().take(BROKEN_LINK_SAMPLE) {
        match page.url.join(href) {
            Ok(resolved) => match probe(client, &resolved).await {
                Some(response) if !response.is_broken() => {}
                _ => broken += 1,
            },
            Err(_) => broken += 1,
        }
    }
    broken
}

/// Scores the pillar from already-gathered observations. Pure.
pub fn score_links_observed(page: &Page, keyword: &str, broken: usize) -> PillarResult {
    let mut result = PillarResult::new(Pillar::Links, 10.0);

    score_url_length(&mut result, &page.url);
    score_slug_keywords(&mut result, page, keyword);
    score_canonical(&mut result, page);
    score_link_counts(&mut result, count_links(page));
    score_broken(&mut result, broken);

    result
}

/// Scores the pillar, probing the anchor sample first.
pub async fn score_links(client: &Client, page: &Page, keyword: &str) -> PillarResult {
    let broken = count_broken_links(client, page).await;
    score_links_observed(page, keyword, broken)
}

fn score_url_length(result: &mut PillarResult, url: &Url) {
    let without_scheme = url
        .as_str()
        .strip_prefix("https://")
        .or_else(|| url.as_str().strip_prefix("http://"))
        .unwrap_or(url.as_str());
    let length = without_scheme.chars().count();
    result.detail("URL Length (chars)", length);

    if (30..=65).contains(&length) {
        result.score += 2.0;
        result.detail("URL Length Score", "2 / 2");
    } else if (25..=29).contains(&length) || (66..=75).contains(&length) {
        result.score += 1.0;
        result.detail("URL Length Score", "1 / 2");
        result.suggest("Optimize URL length to 30-65 chars.");
    } else {
        result.detail("URL Length Score", "0 / 2");
        result.suggest("URL too short/long; aim for 30-65 chars.");
    }
}

fn score_slug_keywords(result: &mut PillarResult, page: &Page, keyword: &str) {
    let overlap = if keyword.trim().is_empty() { 0 } else { slug_keyword_overlap(&page.url, keyword) };
    result.detail("Keywords in URL", overlap);

    // Literal rule: only 1-2 overlapping tokens earn the point; three or
    // more score zero, same as none.
    if overlap == 1 || overlap == 2 {
        result.score += 1.0;
        result.detail("Keywords in URL Score", "1 / 1");
    } else {
        result.detail("Keywords in URL Score", "0 / 1");
        result.suggest("Include 1-2 primary keywords in the URL slug.");
    }
}

fn score_canonical(result: &mut PillarResult, page: &Page) {
    match &page.canonical {
        Some(href) if !href.is_empty() => {
            result.detail("Canonical Tag", href);
            result.score += 1.0;
            result.detail("Canonical Score", "1 / 1");
        }
        _ => {
            result.detail("Canonical Tag", "Missing");
            result.detail("Canonical Score", "0 / 1");
            result.suggest("Add a correct canonical tag.");
        }
    }
}

fn score_link_counts(result: &mut PillarResult, counts: LinkCounts) {
    result.detail("Internal Links", counts.internal);
    result.detail("External Links", counts.external);

    if (2..=15).contains(&counts.internal) {
        result.score += 2.0;
        result.detail("Internal Links Score", "2 / 2");
    } else if matches!(counts.internal, 1 | 16 | 17) {
        result.score += 1.0;
        result.detail("Internal Links Score", "1 / 2");
        result.suggest("Keep internal links within 2-15 and ensure relevance.");
    } else {
        result.detail("Internal Links Score", "0 / 2");
        result.suggest("Add relevant internal links (aim 2-15).");
    }

    if (1..=5).contains(&counts.external) {
        result.score += 2.0;
        result.detail("External Links Score", "2 / 2");
    } else if counts.external > 5 {
        result.score += 1.0;
        result.detail("External Links Score", "1 / 2");
        result.suggest("Use 1-5 authoritative external links.");
    } else {
        result.detail("External Links Score", "0 / 2");
        result.suggest("Use 1-5 authoritative external links.");
    }
}

fn score_broken(result: &mut PillarResult, broken: usize) {
    result.detail("Broken Links (sample of ~15)", broken);

    if broken == 0 {
        result.score += 2.0;
        result.detail("Broken Links Score", "2 / 2");
    } else if broken == 1 {
        result.score += 1.0;
        result.detail("Broken Links Score", "1 / 2");
        result.suggest("Fix the broken link found.");
    } else {
        result.detail("Broken Links Score", "0 / 2");
        result.suggest("Fix broken links (check all anchors).");
    }
}
