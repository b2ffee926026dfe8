//! Page performance pillar.
//!
//! Two mutually exclusive modes sharing one result contract. With a
//! PageSpeed key the pillar scores real Lighthouse metrics (measured
//! mode); without one it approximates the same four dimensions from
//! static page inspection plus a media-optimization check (heuristic
//! mode). The mode used is always recorded in the details.

use reqwest::Client;

use crate::fetch::probe;
use crate::page::Page;
use crate::pagespeed::{self, PageSpeedMetrics};
use crate::report::{Pillar, PillarResult};
use crate::text::round2;

const AVAILABLE: f64 = 30.0;

/// How many images the heuristic mode probes for byte sizes.
const IMAGE_SAMPLE: usize = 15;
/// How many of the sampled images feed the page-weight sum.
const WEIGHT_SAMPLE: usize = 8;
/// Sampled images above this size count as "large".
const LARGE_IMAGE_KB: f64 = 150.0;

/// Scores the performance pillar, preferring measured mode when a
/// PageSpeed key is supplied and the API call succeeds.
pub async fn score_performance(client: &Client, page: &Page, psi_key: Option<&str>) -> PillarResult {
    if let Some(key) = active_psi_key(psi_key) {
        if let Some(metrics) = pagespeed::fetch_metrics(client, &page.url, key).await {
            return score_measured(&metrics);
        }
    }
    let signals = StaticSignals::collect(client, page).await;
    score_heuristic(&signals)
}

/// Scores Lighthouse metrics from PageSpeed Insights. Pure.
pub fn score_measured(metrics: &PageSpeedMetrics) -> PillarResult {
    let mut result = PillarResult::new(Pillar::Performance, AVAILABLE);
    result.detail("Performance Mode", "Measured (PageSpeed)");

    // Total blocking time halved is a rough first-input-delay stand-in,
    // clamped to the 0-300ms range Lighthouse reports for FID.
    let fid_est = metrics.tbt_ms.map(|tbt| (tbt * 0.5).clamp(0.0, 300.0));

    result.detail("LCP (s)", display_opt(metrics.lcp_s.map(round2)));
    result.detail("CLS", display_opt(metrics.cls));
    result.detail(
        "FID (est. ms)",
        display_opt(fid_est.map(|v| v.round())),
    );

    match metrics.lcp_s {
        Some(lcp) if lcp <= 2.5 => {
            result.score += 6.0;
            result.detail("LCP Score", "6 / 6");
        }
        Some(lcp) if lcp <= 3.0 => {
            result.score += 4.0;
            result.detail("LCP Score", "4 / 6");
            result.suggest("Improve LCP by optimizing hero image/fonts and server TTFB.");
        }
        Some(_) => {
            result.detail("LCP Score", "0 / 6");
            result.suggest("High LCP; compress images, enable caching/CDN, reduce JS.");
        }
        None => {
            result.detail("LCP Score", "0 / 6");
            result.suggest("Could not read LCP from PageSpeed.");
        }
    }

    match fid_est {
        Some(fid) if fid <= 100.0 => {
            result.score += 5.0;
            result.detail("FID Score", "5 / 5");
        }
        Some(fid) if fid <= 200.0 => {
            result.score += 3.0;
            result.detail("FID Score", "3 / 5");
            result.suggest("Reduce main-thread work; split bundles; defer non-critical JS.");
        }
        _ => {
            result.detail("FID Score", "0 / 5");
            result.suggest("High input delay; audit JS and reduce long tasks.");
        }
    }

    match metrics.cls {
        Some(cls) if cls <= 0.1 => {
            result.score += 5.0;
            result.detail("CLS Score", "5 / 5");
        }
        Some(cls) if cls <= 0.25 => {
            result.score += 3.0;
            result.detail("CLS Score", "3 / 5");
            result.suggest("Stabilize layout; set width/height for images/ads; avoid shifts.");
        }
        _ => {
            result.detail("CLS Score", "0 / 5");
            result.suggest("Large layout shift; reserve space for media and late content.");
        }
    }

    match metrics.interactive_ms {
        Some(interactive) => {
            let secs = interactive / 1000.0;
            result.detail("Total Load (s)", round2(secs));
            if secs <= 3.0 {
                result.score += 6.0;
                result.detail("Load Time Score", "6 / 6");
            } else if secs <= 4.0 {
                result.score += 3.0;
                result.detail("Load Time Score", "3 / 6");
                result.suggest("Reduce overall JS/CSS, enable compression & HTTP/2.");
            } else {
                result.detail("Load Time Score", "0 / 6");
                result.suggest("Slow load; audit network waterfall for heavy assets.");
            }
        }
        None => {
            // No interactive-time metric: exclude the sub-score rather
            // than scoring it zero.
            result.available -= 6.0;
            result.detail("Load Time Score", "Excluded (no PSI interactive)");
        }
    }

    result
}

/// Static inspection results feeding heuristic mode.
#[derive(Debug, Clone, Default)]
pub struct StaticSignals {
    /// Summed Content-Length of the first probed images, in KB.
    pub sampled_image_kb: f64,
    /// Sampled images above [`LARGE_IMAGE_KB`].
    pub large_images: usize,
    /// Sampled images with webp/avif filenames.
    pub modern_formats: usize,
    /// Total bytes of inline script bodies.
    pub inline_script_bytes: usize,
    /// Images lacking explicit width+height (whole page, not the sample).
    pub images_missing_dimensions: usize,
    /// External script plus stylesheet references.
    pub external_resources: usize,
}

impl StaticSignals {
    /// The network-free signals, straight from the page snapshot.
    pub fn from_page(page: &Page) -> Self {
        Self {
            inline_script_bytes: page.inline_script_bytes,
            images_missing_dimensions: page.images.iter().filter(|i| !i.has_dimensions).count(),
            external_resources: page.external_script_count + page.stylesheets.len(),
            ..Default::default()
        }
    }

    /// Gathers all signals, probing the first [`IMAGE_SAMPLE`] image URLs
    /// for byte sizes. Probe failures leave that image out of the weight
    /// and large-image counts.
    pub async fn collect(client: &Client, page: &Page) -> Self {
        let mut signals = Self::from_page(page);

        for (index, image) in page.images.iter().take(IMAGE_SAMPLE).enumerate() {
            let Some(src) = &image.src else { continue };

            if is_modern_format(src) {
                signals.modern_formats += 1;
            }

            let Ok(resolved) = page.url.join(src) else { continue };
            let Some(bytes) = probe(client, &resolved)
                .await
                .and_then(|r| r.content_length)
            else {
                continue;
            };

            let kb = bytes as f64 / 1024.0;
            if index < WEIGHT_SAMPLE {
                signals.sampled_image_kb += kb;
            }
            if kb > LARGE_IMAGE_KB {
                signals.large_images += 1;
            }
        }

        signals
    }
}

/// Scores heuristic mode from gathered signals. Pure.
pub fn score_heuristic(signals: &StaticSignals) -> PillarResult {
    let mut result = PillarResult::new(Pillar::Performance, AVAILABLE);
    result.detail("Performance Mode", "Heuristic (no PageSpeed key)");

    // LCP proxy: sampled image payload.
    result.detail("Image Weight (sample KB)", round1(signals.sampled_image_kb));
    if signals.sampled_image_kb <= 300.0 {
        result.score += 4.0;
        result.detail("LCP Heuristic Score", "4 / 6");
    } else if signals.sampled_image_kb <= 600.0 {
        result.score += 2.0;
        result.detail("LCP Heuristic Score", "2 / 6");
        result.suggest("Compress/resize images; use AVIF/WebP.");
    } else {
        result.detail("LCP Heuristic Score", "0 / 6");
        result.suggest("Large image payload; optimize hero & critical media.");
    }

    // Input-delay proxy: inline script weight.
    if signals.inline_script_bytes <= 20_000 {
        result.score += 4.0;
        result.detail("FID Heuristic Score", "4 / 5");
    } else if signals.inline_script_bytes <= 50_000 {
        result.score += 2.0;
        result.detail("FID Heuristic Score", "2 / 5");
        result.suggest("Reduce inline JS; defer non-critical tasks.");
    } else {
        result.detail("FID Heuristic Score", "0 / 5");
        result.suggest("Heavy inline JS; split & defer.");
    }

    // Layout-shift proxy: images without reserved dimensions.
    if signals.images_missing_dimensions == 0 {
        result.score += 4.0;
        result.detail("CLS Heuristic Score", "4 / 5");
    } else if signals.images_missing_dimensions <= 2 {
        result.score += 2.0;
        result.detail("CLS Heuristic Score", "2 / 5");
        result.suggest("Set width/height on images to avoid layout shift.");
    } else {
        result.detail("CLS Heuristic Score", "0 / 5");
        result.suggest("Many images without dimensions; reserve space.");
    }

    // Load-time proxy: external request count.
    result.detail("External JS+CSS Count", signals.external_resources);
    if signals.external_resources <= 10 {
        result.score += 4.0;
        result.detail("Load Time Heuristic Score", "4 / 6");
    } else if signals.external_resources <= 18 {
        result.score += 2.0;
        result.detail("Load Time Heuristic Score", "2 / 6");
        result.suggest("Reduce external requests; bundle/minify.");
    } else {
        result.detail("Load Time Heuristic Score", "0 / 6");
        result.suggest("Too many external files; consolidate assets.");
    }

    // Media optimization: large-image count and modern formats combine
    // into an additive 0-8 sub-score.
    result.detail("Large Images (>150KB, sample)", signals.large_images);
    result.detail("Modern Formats (sample)", signals.modern_formats);
    let mut media_score: f64 = 0.0;
    if signals.large_images == 0 {
        media_score += 4.0;
    } else if signals.large_images <= 2 {
        media_score += 2.0;
        result.suggest("Compress images ≥ 150KB.");
    }
    if signals.modern_formats >= 2 {
        media_score += 4.0;
    } else if signals.modern_formats == 1 {
        media_score += 2.0;
        result.suggest("Use AVIF/WebP for hero & gallery.");
    }
    let media_score = media_score.min(8.0);
    result.detail("Media Heuristic Score", format!("{} / 8", media_score));
    result.score += media_score;

    result
}

/// A blank or whitespace-only key means no key at all; heuristic mode
/// applies rather than a doomed PageSpeed call.
fn active_psi_key(key: Option<&str>) -> Option<&str> {
    key.map(str::trim).filter(|k| !k.is_empty())
}

fn is_modern_format(src: &str) -> bool {
    let lower = src.to_lowercase();
    lower.ends_with(".webp") || lower.ends_with(".avif")
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn display_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "N/A".to_string(),
    }
}
