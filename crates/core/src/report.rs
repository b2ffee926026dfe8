//! Audit result types and weighted aggregation.
//!
//! Each pillar scorer produces a [`PillarResult`] holding its raw score,
//! the points that were actually available (originality and PageSpeed
//! exclusions shrink the denominator, never the advertised maximum), an
//! ordered details list for display, and its suggestions. The aggregator
//! normalizes each pillar against its own available points, scales by the
//! pillar's fixed weight, and sums to the overall score out of 100.

use serde::Serialize;

use crate::ContentType;

/// The five scoring dimensions and their fixed weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Pillar {
    #[serde(rename = "Content Quality & Relevance")]
    Content,
    #[serde(rename = "HTML Tag Optimization")]
    HtmlTags,
    #[serde(rename = "URL & Link Structure")]
    Links,
    #[serde(rename = "Page Performance")]
    Performance,
    #[serde(rename = "Mobile-Friendliness & UX")]
    Mobile,
}

impl Pillar {
    /// Display heading for this pillar.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Content => "Content Quality & Relevance",
            Self::HtmlTags => "HTML Tag Optimization",
            Self::Links => "URL & Link Structure",
            Self::Performance => "Page Performance",
            Self::Mobile => "Mobile-Friendliness & UX",
        }
    }

    /// Fixed weight of this pillar in the overall score.
    ///
    /// The weights sum to 100, which is also the advertised total
    /// regardless of any per-pillar exclusions.
    pub fn weight(&self) -> f64 {
        match self {
            Self::Content => 20.0,
            Self::HtmlTags => 10.0,
            Self::Links => 10.0,
            Self::Performance => 30.0,
            Self::Mobile => 30.0,
        }
    }
}

/// The outcome of scoring one pillar.
///
/// `score` never exceeds `available`. The details list preserves insertion
/// order for display.
#[derive(Debug, Clone, Serialize)]
pub struct PillarResult {
    pub pillar: Pillar,
    /// Raw points earned.
    pub score: f64,
    /// Points that were actually obtainable given the inputs supplied.
    pub available: f64,
    /// Ordered label → observation pairs for display.
    pub details: Vec<(String, String)>,
    /// Human-readable improvement suggestions, in the order found.
    pub suggestions: Vec<String>,
}

impl PillarResult {
    /// Creates an empty result for a pillar with a fixed available maximum.
    pub fn new(pillar: Pillar, available: f64) -> Self {
        Self { pillar, score: 0.0, available, details: Vec::new(), suggestions: Vec::new() }
    }

    /// Records a labelled observation.
    pub fn detail(&mut self, label: &str, value: impl ToString) {
        self.details.push((label.to_string(), value.to_string()));
    }

    /// Records an improvement suggestion.
    pub fn suggest(&mut self, text: impl Into<String>) {
        self.suggestions.push(text.into());
    }

    /// This pillar's contribution to the overall score:
    /// `(score / available) × weight`, or 0 when nothing was available.
    pub fn weighted(&self) -> f64 {
        if self.available <= 0.0 {
            return 0.0;
        }
        (self.score / self.available) * self.pillar.weight()
    }
}

/// Terminal artifact of one audit run.
#[derive(Debug, Clone, Serialize)]
pub struct AuditResult {
    pub content_type: ContentType,
    pub pillars: Vec<PillarResult>,
    /// Sum of weighted pillar contributions.
    pub total_score: f64,
    /// Sum of the fixed weights; always 100.
    pub total_possible: f64,
}

impl AuditResult {
    /// Aggregates pillar results into the weighted total.
    pub fn from_pillars(content_type: ContentType, pillars: Vec<PillarResult>) -> Self {
        let total_score = pillars.iter().map(PillarResult::weighted).sum();
        let total_possible = pillars.iter().map(|p| p.pillar.weight()).sum();
        Self { content_type, pillars, total_score, total_possible }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(pillar: Pillar, score: f64, available: f64) -> PillarResult {
        PillarResult { score, ..PillarResult::new(pillar, available) }
    }

    #[test]
    fn test_weights_sum_to_one_hundred() {
        let total: f64 = [Pillar::Content, Pillar::HtmlTags, Pillar::Links, Pillar::Performance, Pillar::Mobile]
            .iter()
            .map(Pillar::weight)
            .sum();
        assert_eq!(total, 100.0);
    }

    #[test]
    fn test_weighted_normalization() {
        // Half the raw points earns half the weight.
        let r = result(Pillar::Content, 10.0, 20.0);
        assert_eq!(r.weighted(), 10.0);

        // Full raw points earn exactly the weight.
        let r = result(Pillar::Performance, 30.0, 30.0);
        assert_eq!(r.weighted(), 30.0);
    }

    #[test]
    fn test_weighted_zero_available() {
        let r = result(Pillar::Links, 0.0, 0.0);
        assert_eq!(r.weighted(), 0.0);
    }

    #[test]
    fn test_exclusion_raises_normalized_share() {
        // Originality exclusion shrinks the denominator: the same raw score
        // is worth more of the pillar's weight.
        let with_exclusion = result(Pillar::Content, 15.0, 17.0);
        let without = result(Pillar::Content, 15.0, 20.0);
        assert!(with_exclusion.weighted() > without.weighted());
    }

    #[test]
    fn test_aggregate_bounds() {
        let pillars = vec![
            result(Pillar::Content, 17.0, 17.0),
            result(Pillar::HtmlTags, 7.5, 10.0),
            result(Pillar::Links, 6.0, 10.0),
            result(Pillar::Performance, 19.0, 24.0),
            result(Pillar::Mobile, 23.0, 30.0),
        ];
        let audit = AuditResult::from_pillars(crate::ContentType::BlogPost, pillars);

        assert_eq!(audit.total_possible, 100.0);
        assert!(audit.total_score <= 100.0);
        for p in &audit.pillars {
            assert!(p.weighted() <= p.pillar.weight() + 1e-9);
        }
    }

    #[test]
    fn test_total_possible_unaffected_by_exclusions() {
        let pillars = vec![
            result(Pillar::Content, 10.0, 17.0),
            result(Pillar::HtmlTags, 5.0, 10.0),
            result(Pillar::Links, 5.0, 10.0),
            result(Pillar::Performance, 12.0, 24.0),
            result(Pillar::Mobile, 15.0, 30.0),
        ];
        let audit = AuditResult::from_pillars(crate::ContentType::ServicePage, pillars);
        assert_eq!(audit.total_possible, 100.0);
    }
}
