//! Data models for the matchup analyst.
//!
//! This module contains the core data structures used throughout the
//! application: the user's query, parsed prediction sections, display
//! nodes for the analysis text, and web sources from search grounding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A free-text matchup description entered by the user.
///
/// Immutable once submitted; lives only for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchQuery(String);

impl MatchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the query is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// A web source cited by the model through search grounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    /// URI of the cited page.
    pub uri: String,
    /// Page title as reported by the search index.
    pub title: String,
}

/// The model's response split into the free-form analysis and the five
/// fixed verdict fields.
///
/// All verdict fields are optional; a response with no recognized verdict
/// tags yields an analysis-only report, which is valid, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReport {
    /// Free-form prose preceding the first verdict tag.
    pub analysis: String,
    /// Proposed bet(s), from the target-marker line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_bets: Option<String>,
    /// Confidence score out of 5, from the fire-marker line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<String>,
    /// Staking plan (Aggressive/Balanced/Cautious), from the chart-marker line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staking_plan: Option<String>,
    /// Whether any red flags were triggered, from the warning-marker line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub red_flags: Option<String>,
    /// Safety notes or live strategy, from the shield-marker line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_notes: Option<String>,
}

impl ParsedReport {
    /// The analysis text with trailing whitespace trimmed, for display.
    pub fn analysis_trimmed(&self) -> &str {
        self.analysis.trim_end()
    }

    /// True when the safety-notes section should be shown: present and not
    /// the literal "None" placeholder the prompt allows.
    pub fn has_safety_notes(&self) -> bool {
        self.safety_notes
            .as_deref()
            .is_some_and(|notes| !notes.eq_ignore_ascii_case("none"))
    }
}

/// One inline span of analysis text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Span {
    /// Unemphasized text (may be empty; renderers skip empty spans).
    Plain(String),
    /// Text wrapped in double-asterisk emphasis in the source.
    Bold(String),
}

impl Span {
    pub fn text(&self) -> &str {
        match self {
            Span::Plain(text) | Span::Bold(text) => text,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }
}

/// A typed block of formatted analysis text.
///
/// Never mutated after construction; consumed only by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DisplayNode {
    /// A subheading (source line ended with a colon).
    Heading { spans: Vec<Span> },
    /// A regular prose paragraph.
    Paragraph { spans: Vec<Span> },
    /// One or more consecutive bullet items.
    List { items: Vec<Vec<Span>> },
}

/// The combined result of one prediction request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    /// Sections parsed from the model's text.
    pub report: ParsedReport,
    /// Deduplicated grounding sources, in order of first appearance.
    pub sources: Vec<WebSource>,
}

/// Metadata about one analysis run, for the report header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// The matchup description that was analyzed.
    pub match_info: String,
    /// Date and time of the analysis.
    pub analysis_date: DateTime<Utc>,
    /// Name of the model used.
    pub model_used: String,
    /// Number of unique web sources cited.
    pub source_count: usize,
    /// Duration of the request in seconds.
    pub duration_seconds: f64,
}

/// The complete report written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Metadata about the run.
    pub metadata: ReportMetadata,
    /// Parsed prediction sections and sources.
    pub prediction: Prediction,
}
