//! Client for the Gemini `generateContent` API.
//!
//! Defines the generator trait and wire types for requesting a grounded
//! text generation. The trait abstracts over transport so the orchestrator
//! can be exercised with a mock in tests.

use crate::error::PredictionError;
use crate::parse::RawCitation;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Text plus grounding citations returned by one generation call.
#[derive(Debug, Clone, Default)]
pub struct GeneratedContent {
    /// The model's full text response.
    pub text: String,
    /// Search-grounding citations, in response order, possibly duplicated.
    pub citations: Vec<RawCitation>,
}

/// A text-generation backend with web-search grounding.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a response for `prompt` under `system_instruction`, with
    /// search grounding enabled.
    async fn generate(
        &self,
        prompt: &str,
        system_instruction: &str,
    ) -> Result<GeneratedContent, PredictionError>;
}

/// Configuration for the Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_url: String,
    pub api_key: String,
    pub model_name: String,
    pub timeout_seconds: u64,
}

// --- wire types -----------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
struct WebChunk {
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

// --------------------------------------------------------------------------

/// HTTP client for the hosted Gemini endpoint.
pub struct GeminiClient {
    config: GeminiConfig,
    http_client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            self.config.model_name
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        system_instruction: &str,
    ) -> Result<GeneratedContent, PredictionError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
                role: Some("user".to_string()),
            }],
            system_instruction: Content {
                parts: vec![Part {
                    text: system_instruction.to_string(),
                }],
                role: None,
            },
            tools: vec![Tool {
                google_search: serde_json::json!({}),
            }],
        };

        let url = self.endpoint();
        debug!("Sending generateContent request to {}", url);

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PredictionError::ExternalService(format!(
                        "Request timed out after {}s",
                        self.config.timeout_seconds
                    ))
                } else if e.is_connect() {
                    PredictionError::ExternalService(format!(
                        "Cannot connect to {}",
                        self.config.api_url
                    ))
                } else {
                    PredictionError::ExternalService(format!("Failed to send request: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PredictionError::ExternalService(format!(
                "API error {}: {}",
                status, body
            )));
        }

        let generated: GenerateContentResponse = response.json().await.map_err(|e| {
            PredictionError::ExternalService(format!("Failed to parse API response: {}", e))
        })?;

        Ok(flatten_response(generated))
    }
}

/// Pull text and citations out of the first candidate.
///
/// A response with no candidates yields empty content, which downstream
/// parsing treats as an analysis-only report, not an error.
fn flatten_response(response: GenerateContentResponse) -> GeneratedContent {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return GeneratedContent::default();
    };

    let text = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    let citations = candidate
        .grounding_metadata
        .map(|metadata| {
            metadata
                .grounding_chunks
                .into_iter()
                .map(|chunk| match chunk.web {
                    Some(web) => RawCitation {
                        uri: web.uri,
                        title: web.title,
                    },
                    None => RawCitation::default(),
                })
                .collect()
        })
        .unwrap_or_default();

    GeneratedContent { text, citations }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        let client = GeminiClient::new(GeminiConfig {
            api_url: "https://generativelanguage.googleapis.com/".to_string(),
            api_key: "k".to_string(),
            model_name: "gemini-2.5-flash".to_string(),
            timeout_seconds: 60,
        });

        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_flatten_response_text_and_citations() {
        let raw = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Part one. " }, { "text": "Part two." }] },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "uri": "https://example.com", "title": "Example" } },
                        { "web": { "uri": "https://example.com" } },
                        {}
                    ]
                }
            }]
        });

        let response: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        let content = flatten_response(response);

        assert_eq!(content.text, "Part one. Part two.");
        assert_eq!(content.citations.len(), 3);
        assert_eq!(content.citations[0].uri.as_deref(), Some("https://example.com"));
        assert_eq!(content.citations[1].title, None);
        assert_eq!(content.citations[2], RawCitation::default());
    }

    #[test]
    fn test_flatten_empty_response() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        let content = flatten_response(response);

        assert_eq!(content.text, "");
        assert!(content.citations.is_empty());
    }

    #[test]
    fn test_request_serialization_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "prompt".to_string(),
                }],
                role: Some("user".to_string()),
            }],
            system_instruction: Content {
                parts: vec![Part {
                    text: "system".to_string(),
                }],
                role: None,
            },
            tools: vec![Tool {
                google_search: serde_json::json!({}),
            }],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "prompt");
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "system");
        assert!(value["tools"][0]["google_search"].is_object());
    }
}
