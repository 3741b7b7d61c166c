//! Markdown report generation.
//!
//! Renders a parsed prediction into the report layout: verdict summary
//! cards, the formatted full analysis, conditional safety notes, and the
//! research sources list.

use crate::models::{DisplayNode, Report, ReportMetadata, Span, WebSource};
use crate::parse::format_analysis;
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    // Title
    output.push_str("# MatchIntel Report\n\n");

    // Metadata section
    output.push_str(&generate_metadata_section(&report.metadata));

    // Verdict summary cards
    output.push_str(&generate_verdict_section(report));

    // Full analysis
    output.push_str(&generate_analysis_section(report));

    // Safety notes (suppressed when absent or "None")
    output.push_str(&generate_safety_section(report));

    // Research sources (suppressed when empty)
    output.push_str(&generate_sources_section(&report.prediction.sources));

    // Footer
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Match:** {}\n", metadata.match_info));
    section.push_str(&format!(
        "- **Analysis Date:** {}\n",
        metadata.analysis_date.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Model Used:** `{}`\n", metadata.model_used));
    section.push_str(&format!("- **Sources Cited:** {}\n", metadata.source_count));
    section.push_str(&format!(
        "- **Duration:** {:.1}s\n",
        metadata.duration_seconds
    ));
    section.push_str("\n");

    section
}

/// Generate the verdict summary cards, one line per present field.
fn generate_verdict_section(report: &Report) -> String {
    let parsed = &report.prediction.report;

    let cards: Vec<(&str, &Option<String>)> = vec![
        ("🎯 **Best Bet(s):**", &parsed.best_bets),
        ("🔥 **Confidence:**", &parsed.confidence_score),
        ("📊 **Staking Plan:**", &parsed.staking_plan),
        ("⚠️ **Red Flags:**", &parsed.red_flags),
    ];

    if cards.iter().all(|(_, value)| value.is_none()) {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## Verdict\n\n");

    for (label, value) in cards {
        if let Some(value) = value {
            section.push_str(&format!("- {} {}\n", label, value));
        }
    }
    section.push_str("\n");

    section
}

/// Generate the full-analysis section from formatted display nodes.
fn generate_analysis_section(report: &Report) -> String {
    let analysis = report.prediction.report.analysis_trimmed();
    if analysis.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## Full Analysis\n\n");

    for node in format_analysis(analysis) {
        section.push_str(&render_node(&node));
    }

    section
}

/// Render one display node as Markdown.
fn render_node(node: &DisplayNode) -> String {
    match node {
        DisplayNode::Heading { spans } => format!("### {}\n\n", render_spans(spans)),
        DisplayNode::Paragraph { spans } => format!("{}\n\n", render_spans(spans)),
        DisplayNode::List { items } => {
            let mut block = String::new();
            for item in items {
                block.push_str(&format!("- {}\n", render_spans(item)));
            }
            block.push_str("\n");
            block
        }
    }
}

/// Render inline spans as Markdown, skipping empty segments.
fn render_spans(spans: &[Span]) -> String {
    spans
        .iter()
        .filter(|span| !span.is_empty())
        .map(|span| match span {
            Span::Plain(text) => text.clone(),
            Span::Bold(text) => format!("**{}**", text),
        })
        .collect()
}

/// Generate the safety-notes section. Suppressed when the field is absent
/// or case-insensitively equals "none".
fn generate_safety_section(report: &Report) -> String {
    let parsed = &report.prediction.report;
    if !parsed.has_safety_notes() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## 🛡️ Safety Notes & Strategy\n\n");
    if let Some(ref notes) = parsed.safety_notes {
        section.push_str(notes);
        section.push_str("\n\n");
    }

    section
}

/// Generate the research-sources section. Suppressed when empty.
fn generate_sources_section(sources: &[WebSource]) -> String {
    if sources.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## Research Sources\n\n");

    for (i, source) in sources.iter().enumerate() {
        section.push_str(&format!("{}. [{}]({})\n", i + 1, source.title, source.uri));
    }
    section.push_str("\n");

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by MatchIntel*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ParsedReport, Prediction};
    use chrono::Utc;

    fn create_test_report() -> Report {
        let metadata = ReportMetadata {
            match_info: "Arsenal vs Chelsea".to_string(),
            analysis_date: Utc::now(),
            model_used: "gemini-2.5-flash".to_string(),
            source_count: 2,
            duration_seconds: 12.5,
        };

        Report {
            metadata,
            prediction: Prediction {
                report: ParsedReport {
                    analysis: "Team Form:\n* **Haaland** scored 5 goals.\n* Defense is weak.\n"
                        .to_string(),
                    best_bets: Some("Home win".to_string()),
                    confidence_score: Some("4/5".to_string()),
                    staking_plan: Some("Balanced".to_string()),
                    red_flags: Some("No".to_string()),
                    safety_notes: Some("None".to_string()),
                },
                sources: vec![
                    WebSource {
                        uri: "https://a.example".to_string(),
                        title: "Source A".to_string(),
                    },
                    WebSource {
                        uri: "https://b.example".to_string(),
                        title: "Source B".to_string(),
                    },
                ],
            },
        }
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = create_test_report();
        let markdown = generate_markdown_report(&report);

        assert!(markdown.contains("# MatchIntel Report"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("Arsenal vs Chelsea"));
        assert!(markdown.contains("## Verdict"));
        assert!(markdown.contains("🎯 **Best Bet(s):** Home win"));
        assert!(markdown.contains("## Full Analysis"));
        assert!(markdown.contains("### Team Form"));
        assert!(markdown.contains("- **Haaland** scored 5 goals."));
        assert!(markdown.contains("## Research Sources"));
        assert!(markdown.contains("[Source A](https://a.example)"));
    }

    #[test]
    fn test_safety_notes_none_suppressed() {
        let report = create_test_report();
        let markdown = generate_markdown_report(&report);
        assert!(!markdown.contains("Safety Notes & Strategy"));
    }

    #[test]
    fn test_safety_notes_rendered_when_meaningful() {
        let mut report = create_test_report();
        report.prediction.report.safety_notes = Some("Cash out at 70'".to_string());

        let markdown = generate_markdown_report(&report);
        assert!(markdown.contains("## 🛡️ Safety Notes & Strategy"));
        assert!(markdown.contains("Cash out at 70'"));
    }

    #[test]
    fn test_verdict_cards_only_when_present() {
        let mut report = create_test_report();
        report.prediction.report.confidence_score = None;
        report.prediction.report.red_flags = None;

        let markdown = generate_markdown_report(&report);
        assert!(markdown.contains("🎯 **Best Bet(s):**"));
        assert!(!markdown.contains("🔥 **Confidence:**"));
        assert!(!markdown.contains("⚠️ **Red Flags:**"));
    }

    #[test]
    fn test_verdict_section_suppressed_when_no_fields() {
        let mut report = create_test_report();
        report.prediction.report = ParsedReport {
            analysis: "Prose only.\n".to_string(),
            ..Default::default()
        };

        let markdown = generate_markdown_report(&report);
        assert!(!markdown.contains("## Verdict"));
        assert!(markdown.contains("Prose only."));
    }

    #[test]
    fn test_sources_section_suppressed_when_empty() {
        let mut report = create_test_report();
        report.prediction.sources.clear();

        let markdown = generate_markdown_report(&report);
        assert!(!markdown.contains("## Research Sources"));
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report();
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"match_info\""));
        assert!(json.contains("\"analysis\""));
        assert!(json.contains("\"sources\""));
        assert!(json.contains("\"best_bets\""));
    }
}
