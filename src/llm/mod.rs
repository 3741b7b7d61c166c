//! Prediction request orchestration.
//!
//! One external call per invocation: build the prompt, invoke the
//! generator, then hand the text to the section extractor and the
//! citations to the source deduplicator. Blank-query validation happens in
//! the caller, before this module is reached.

mod client;
pub mod prompt;

pub use client::{GeminiClient, GeminiConfig, GeneratedContent, TextGenerator};

use crate::error::PredictionError;
use crate::models::{MatchQuery, Prediction};
use crate::parse::{dedupe_sources, extract_sections};
use tracing::info;

/// Request a prediction for a matchup and parse the response.
///
/// Failures from the generator propagate unchanged; there is no retry and
/// no partial result.
pub async fn request_prediction<G: TextGenerator + ?Sized>(
    generator: &G,
    query: &MatchQuery,
) -> Result<Prediction, PredictionError> {
    let user_prompt = prompt::build_user_prompt(query.as_str());

    let generated = generator
        .generate(&user_prompt, prompt::ANALYST_SYSTEM_PROMPT)
        .await?;

    let report = extract_sections(&generated.text);
    let sources = dedupe_sources(&generated.citations);
    info!(
        "Parsed response: {} analysis lines, {} unique sources",
        report.analysis.lines().count(),
        sources.len()
    );

    Ok(Prediction { report, sources })
}
