//! Report rendering for terminal and file output.

use pentaudit_core::{AuditResult, PillarResult};

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Renders the full audit report as plain text.
pub fn render_text(result: &AuditResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("Detected Content Type: {}\n", result.content_type));
    out.push_str(&format!(
        "Overall Score: {} / {}\n",
        round2(result.total_score),
        result.total_possible
    ));

    for pillar in &result.pillars {
        out.push('\n');
        out.push_str(&render_pillar(pillar));
    }

    out.push_str(
        "\nNotes: Performance without a PageSpeed key uses heuristics; originality is \
         optional and excluded from scoring if not provided.\n",
    );
    out
}

fn render_pillar(pillar: &PillarResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} — {} / {}\n",
        pillar.pillar.name(),
        round2(pillar.weighted()),
        pillar.pillar.weight()
    ));
    out.push_str(&format!(
        "  Raw: {} / {}  |  Weight: {}\n",
        round2(pillar.score),
        round2(pillar.available),
        pillar.pillar.weight()
    ));

    for (label, value) in &pillar.details {
        out.push_str(&format!("  {}: {}\n", label, value));
    }

    if !pillar.suggestions.is_empty() {
        out.push_str("  Recommendations:\n");
        for suggestion in &pillar.suggestions {
            out.push_str(&format!("    - {}\n", suggestion));
        }
    }

    out
}

/// Renders the audit result as pretty-printed JSON.
pub fn render_json(result: &AuditResult) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pentaudit_core::{ContentType, Pillar};

    fn sample() -> AuditResult {
        let mut content = PillarResult::new(Pillar::Content, 17.0);
        content.score = 15.0;
        content.detail("Word Count", 1800);
        content.suggest("Add related terms naturally.");

        let mut mobile = PillarResult::new(Pillar::Mobile, 30.0);
        mobile.score = 26.0;
        mobile.detail("Popup Detected", "No");

        AuditResult::from_pillars(ContentType::BlogPost, vec![content, mobile])
    }

    #[test]
    fn test_text_report_layout() {
        let text = render_text(&sample());

        assert!(text.contains("Detected Content Type: Blog Post"));
        assert!(text.contains("Content Quality & Relevance — 17.65 / 20"));
        assert!(text.contains("Raw: 15 / 17  |  Weight: 20"));
        assert!(text.contains("  Word Count: 1800"));
        assert!(text.contains("    - Add related terms naturally."));
        // Pillar without suggestions gets no recommendations block.
        assert_eq!(text.matches("Recommendations:").count(), 1);
    }

    #[test]
    fn test_json_report_decodes() {
        let json = render_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["content_type"], "Blog Post");
        assert_eq!(value["pillars"][0]["pillar"], "Content Quality & Relevance");
        assert_eq!(value["total_possible"], 50.0);
    }
}
