//! Splits raw model output into the free-form analysis and the five
//! fixed verdict fields.
//!
//! The model is instructed to end every response with a verdict block of
//! five lines, each opening with a marker glyph and a label. Everything
//! before the first marker line is analysis prose; unrecognized lines
//! after the block starts are accepted drift and dropped.

use crate::models::ParsedReport;

/// The five verdict-line markers, identified by their first Unicode scalar.
///
/// Matching on the scalar rather than a byte prefix keeps the parser
/// independent of whether the model emits the U+FE0F variation selector
/// after ⚠ or 🛡.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VerdictTag {
    BestBets,
    ConfidenceScore,
    StakingPlan,
    RedFlags,
    SafetyNotes,
}

impl VerdictTag {
    /// Classify a trimmed, non-blank line by its leading marker glyph.
    fn classify(trimmed: &str) -> Option<Self> {
        match trimmed.chars().next()? {
            '\u{1F3AF}' => Some(VerdictTag::BestBets),       // 🎯
            '\u{1F525}' => Some(VerdictTag::ConfidenceScore), // 🔥
            '\u{1F4CA}' => Some(VerdictTag::StakingPlan),    // 📊
            '\u{26A0}' => Some(VerdictTag::RedFlags),        // ⚠
            '\u{1F6E1}' => Some(VerdictTag::SafetyNotes),    // 🛡
            _ => None,
        }
    }

    /// The label text the prompt mandates after this marker.
    fn label(self) -> &'static str {
        match self {
            VerdictTag::BestBets => "Best Bet(s):",
            VerdictTag::ConfidenceScore => "Confidence Score:",
            VerdictTag::StakingPlan => "Staking Plan:",
            VerdictTag::RedFlags => "Red Flags Triggered:",
            VerdictTag::SafetyNotes => "Safety Notes or Live Strategy:",
        }
    }

    /// Strip this tag's marker glyph (plus any variation selectors) and its
    /// label from the front of a trimmed line, returning the field value.
    ///
    /// The label match is case-insensitive. A line whose label drifted from
    /// the template keeps its remaining text after the marker; that is
    /// tolerance, not an error.
    fn strip(self, trimmed: &str) -> String {
        let mut chars = trimmed.chars();
        chars.next();
        let mut rest = chars.as_str();
        rest = rest.trim_start_matches('\u{FE0F}').trim_start();

        let label = self.label();
        if let Some(prefix) = rest.get(..label.len()) {
            if prefix.eq_ignore_ascii_case(label) {
                rest = &rest[label.len()..];
            }
        }
        rest.trim().to_string()
    }
}

/// Split raw model output into analysis prose and verdict fields.
///
/// Blank lines are skipped entirely. Untagged lines before the first
/// verdict tag accumulate into `analysis` verbatim (newline-joined);
/// untagged lines after it are discarded. A repeated tag overwrites the
/// earlier value (last-write-wins, matching upstream output handling).
pub fn extract_sections(raw_text: &str) -> ParsedReport {
    let mut report = ParsedReport::default();
    let mut verdict_started = false;

    for line in raw_text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(tag) = VerdictTag::classify(trimmed) {
            verdict_started = true;
            let value = Some(tag.strip(trimmed));
            match tag {
                VerdictTag::BestBets => report.best_bets = value,
                VerdictTag::ConfidenceScore => report.confidence_score = value,
                VerdictTag::StakingPlan => report.staking_plan = value,
                VerdictTag::RedFlags => report.red_flags = value,
                VerdictTag::SafetyNotes => report.safety_notes = value,
            }
        } else if !verdict_started {
            report.analysis.push_str(line);
            report.analysis.push('\n');
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESPONSE: &str = "Team A is strong.\n\
        🎯 Best Bet(s): Team A to win\n\
        🔥 Confidence Score: 4/5\n\
        📊 Staking Plan: Balanced\n\
        ⚠️ Red Flags Triggered: No\n\
        🛡️ Safety Notes or Live Strategy: None";

    #[test]
    fn test_full_response_splits_into_all_fields() {
        let report = extract_sections(FULL_RESPONSE);

        assert_eq!(report.analysis, "Team A is strong.\n");
        assert_eq!(report.best_bets.as_deref(), Some("Team A to win"));
        assert_eq!(report.confidence_score.as_deref(), Some("4/5"));
        assert_eq!(report.staking_plan.as_deref(), Some("Balanced"));
        assert_eq!(report.red_flags.as_deref(), Some("No"));
        assert_eq!(report.safety_notes.as_deref(), Some("None"));
    }

    #[test]
    fn test_no_tags_yields_analysis_only() {
        let input = "Defensive setups on both sides.\nExpect few chances.";
        let report = extract_sections(input);

        assert_eq!(report.analysis, format!("{}\n", input));
        assert!(report.best_bets.is_none());
        assert!(report.confidence_score.is_none());
        assert!(report.staking_plan.is_none());
        assert!(report.red_flags.is_none());
        assert!(report.safety_notes.is_none());
    }

    #[test]
    fn test_tag_on_first_line_yields_empty_analysis() {
        let report = extract_sections("🎯 Best Bet(s): Over 2.5 goals");
        assert_eq!(report.analysis, "");
        assert_eq!(report.best_bets.as_deref(), Some("Over 2.5 goals"));
    }

    #[test]
    fn test_blank_lines_skipped_entirely() {
        let report = extract_sections("First point.\n\n   \nSecond point.");
        assert_eq!(report.analysis, "First point.\nSecond point.\n");
    }

    #[test]
    fn test_untagged_lines_after_verdict_discarded() {
        let input = "Analysis here.\n🔥 Confidence Score: 3/5\nStray commentary.";
        let report = extract_sections(input);

        assert_eq!(report.analysis, "Analysis here.\n");
        assert_eq!(report.confidence_score.as_deref(), Some("3/5"));
    }

    #[test]
    fn test_repeated_tag_last_write_wins() {
        let input = "🎯 Best Bet(s): Home win\n🎯 Best Bet(s): Draw";
        let report = extract_sections(input);
        assert_eq!(report.best_bets.as_deref(), Some("Draw"));
    }

    #[test]
    fn test_marker_without_variation_selector() {
        let input = "⚠ Red Flags Triggered: Yes\n🛡 Safety Notes or Live Strategy: Hedge late";
        let report = extract_sections(input);

        assert_eq!(report.red_flags.as_deref(), Some("Yes"));
        assert_eq!(report.safety_notes.as_deref(), Some("Hedge late"));
    }

    #[test]
    fn test_label_matched_case_insensitively() {
        let report = extract_sections("📊 STAKING PLAN: Cautious");
        assert_eq!(report.staking_plan.as_deref(), Some("Cautious"));
    }

    #[test]
    fn test_drifted_label_keeps_remaining_text() {
        let report = extract_sections("🔥 Confidence: 5/5");
        assert_eq!(report.confidence_score.as_deref(), Some("Confidence: 5/5"));
    }

    #[test]
    fn test_every_nonblank_line_accounted_once() {
        let input = "intro one\nintro two\n🎯 Best Bet(s): X\ndrift line\n🔥 Confidence Score: 2/5";
        let report = extract_sections(input);

        let analysis_lines = report.analysis.lines().count();
        let verdict_lines = [
            &report.best_bets,
            &report.confidence_score,
            &report.staking_plan,
            &report.red_flags,
            &report.safety_notes,
        ]
        .iter()
        .filter(|field| field.is_some())
        .count();
        let nonblank_input = input.lines().filter(|l| !l.trim().is_empty()).count();

        // 2 analysis + 2 verdict + 1 discarded drift line = 5 input lines.
        assert_eq!(analysis_lines, 2);
        assert_eq!(verdict_lines, 2);
        assert_eq!(nonblank_input, analysis_lines + verdict_lines + 1);
    }

    #[test]
    fn test_analysis_keeps_original_indentation() {
        let report = extract_sections("  indented thought\nplain line");
        assert_eq!(report.analysis, "  indented thought\nplain line\n");
    }
}
