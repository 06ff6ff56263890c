//! Google Gemini client: `generateContent` with JSON response mode, plus
//! model discovery.
//!
//! The request asks the API to constrain its output to JSON
//! (`responseMimeType: "application/json"`) so the reply can be parsed
//! strictly instead of scraped out of prose. Authentication uses the
//! `x-goog-api-key` header rather than a query parameter, keeping the key
//! out of request lines that tend to end up in logs.

use crate::backend::TextGenerator;
use crate::config::SummarizeConfig;
use crate::error::SummarizeError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Client for the Gemini generative-language API.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
    max_output_tokens: usize,
}

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    temperature: f32,
    max_output_tokens: usize,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// One entry from the API's model listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Fully-qualified name, e.g. `models/gemini-2.0-flash`.
    pub name: String,
    /// Methods the model supports, e.g. `generateContent`.
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

// ── Client ───────────────────────────────────────────────────────────────

impl GeminiClient {
    /// Create a client for a known model.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        config: &SummarizeConfig,
    ) -> Result<Self, SummarizeError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .build()
            .map_err(|e| SummarizeError::Internal(format!("HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            model: normalize_model_name(&model.into()),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        })
    }

    /// Create a client from the config, resolving the credential and —
    /// when no model is configured — asking the API for its model list and
    /// taking the first one that supports `generateContent`.
    pub async fn from_config(config: &SummarizeConfig) -> Result<Self, SummarizeError> {
        let api_key = crate::credentials::resolve(config).await?;
        let mut client = Self::new(api_key, config.model.clone().unwrap_or_default(), config)?;

        if client.model.is_empty() {
            let models = client.list_models().await?;
            let picked = first_generate_capable(&models).ok_or_else(|| {
                SummarizeError::GenerationFailed {
                    detail: "no available model supports generateContent".into(),
                }
            })?;
            client.model = normalize_model_name(&picked.name);
            info!("using model {}", client.model);
        }

        Ok(client)
    }

    /// The model this client will call.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Fetch the API's model listing.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, SummarizeError> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| SummarizeError::GenerationFailed {
                detail: format!("model listing failed: {e}"),
            })?;

        let response = check_status(response).await?;
        let listing: ModelsResponse =
            response
                .json()
                .await
                .map_err(|e| SummarizeError::GenerationFailed {
                    detail: format!("model listing could not be decoded: {e}"),
                })?;
        Ok(listing.models)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, SummarizeError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".into(),
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        };

        debug!("POST {url} ({} prompt chars)", prompt.len());

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SummarizeError::GenerationFailed {
                detail: format!("request failed: {e}"),
            })?;

        let response = check_status(response).await?;
        let reply: GenerateContentResponse =
            response
                .json()
                .await
                .map_err(|e| SummarizeError::GenerationFailed {
                    detail: format!("response could not be decoded: {e}"),
                })?;

        extract_text(&reply)
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────

/// Map a non-success HTTP status to the right error variant, keeping a
/// bounded slice of the body for diagnosis.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SummarizeError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let snippet: String = body.chars().take(300).collect();
    let detail = format!("HTTP {status}: {snippet}");

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        Err(SummarizeError::AuthFailed { detail })
    } else {
        Err(SummarizeError::GenerationFailed { detail })
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(reply: &GenerateContentResponse) -> Result<String, SummarizeError> {
    let text: String = reply
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| content.parts.iter().map(|p| p.text.as_str()).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(SummarizeError::GenerationFailed {
            detail: "model returned no content".into(),
        });
    }
    Ok(text)
}

/// The API lists models as `models/<id>`; calls want the bare `<id>`.
fn normalize_model_name(name: &str) -> String {
    name.trim().trim_start_matches("models/").to_string()
}

/// First listed model that supports `generateContent`.
///
/// The listing order is the API's own; no ranking is applied here.
pub fn first_generate_capable(models: &[ModelInfo]) -> Option<&ModelInfo> {
    models
        .iter()
        .find(|m| m.supported_generation_methods.iter().any(|g| g == "generateContent"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_uses_json_response_mode() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hi".into() }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".into(),
                temperature: 0.2,
                max_output_tokens: 1024,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 1024);
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
    }

    #[test]
    fn response_text_is_concatenated() {
        let reply: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"title\""},{"text":":\"T\"}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(&reply).unwrap(), r#"{"title":"T"}"#);
    }

    #[test]
    fn empty_candidates_is_an_error() {
        let reply: GenerateContentResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(matches!(
            extract_text(&reply),
            Err(SummarizeError::GenerationFailed { .. })
        ));
    }

    #[test]
    fn model_discovery_picks_first_capable() {
        let models: Vec<ModelInfo> = serde_json::from_str(
            r#"[
                {"name":"models/embedding-001","supportedGenerationMethods":["embedContent"]},
                {"name":"models/gemini-2.0-flash","supportedGenerationMethods":["generateContent","countTokens"]},
                {"name":"models/gemini-2.5-pro","supportedGenerationMethods":["generateContent"]}
            ]"#,
        )
        .unwrap();

        let picked = first_generate_capable(&models).unwrap();
        assert_eq!(picked.name, "models/gemini-2.0-flash");
    }

    #[test]
    fn model_name_is_normalized() {
        assert_eq!(normalize_model_name("models/gemini-2.0-flash"), "gemini-2.0-flash");
        assert_eq!(normalize_model_name("gemini-2.0-flash"), "gemini-2.0-flash");
    }

    #[test]
    fn client_strips_trailing_slash_from_base_url() {
        let config = SummarizeConfig::builder()
            .gemini_base_url("http://localhost:9999/v1beta/")
            .build()
            .unwrap();
        let client = GeminiClient::new("k", "m", &config).unwrap();
        assert_eq!(client.base_url, "http://localhost:9999/v1beta");
    }
}
