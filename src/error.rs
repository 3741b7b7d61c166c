//! Error taxonomy for the prediction pipeline.

use thiserror::Error;

/// Errors surfaced by the prediction workflow.
///
/// Parse drift (model output missing verdict tags or headings) is not an
/// error: it degrades to an analysis-only report by design.
#[derive(Debug, Error)]
pub enum PredictionError {
    /// The match description (or another argument) was empty or otherwise
    /// unusable. Raised by the caller before any network activity.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The generation service call failed (network, auth, quota, or a
    /// malformed response). Carries the upstream cause; never retried.
    #[error("prediction service error: {0}")]
    ExternalService(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_cause() {
        let err = PredictionError::Validation("empty query".to_string());
        assert_eq!(err.to_string(), "invalid input: empty query");

        let err = PredictionError::ExternalService("HTTP 429: quota".to_string());
        assert!(err.to_string().contains("HTTP 429"));
    }
}
