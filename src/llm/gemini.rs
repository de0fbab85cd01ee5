//! Google Gemini provider implementation

use super::types::{LlmRequest, LlmResponse, Usage};
use super::{LlmError, LlmService};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// API key placeholder used when a gateway handles authentication
pub const GATEWAY_KEY: &str = "implicit";

/// Header carrying the API key in direct mode
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini service implementation
pub struct GeminiService {
    client: Client,
    api_key: String,
    url: String,
    model_id: String,
}

impl GeminiService {
    pub fn new(
        api_key: String,
        model: &str,
        gateway: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let url = match gateway {
            Some(gw) => format!(
                "{}/gemini/v1beta/models/{model}:generateContent",
                gw.trim_end_matches('/')
            ),
            None => format!(
                "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent"
            ),
        };

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            url,
            model_id: model.to_string(),
        })
    }

    fn translate_request(request: &LlmRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(request.prompt.clone()),
                }],
            }],
            generation_config: request.max_tokens.map(|max| GeminiGenerationConfig {
                max_output_tokens: Some(max),
            }),
        }
    }

    fn build_request(&self, request: &LlmRequest) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&Self::translate_request(request));
        if self.api_key == GATEWAY_KEY {
            builder
        } else {
            builder.header(API_KEY_HEADER, &self.api_key)
        }
    }

    fn normalize_response(resp: GeminiResponse) -> Result<LlmResponse, LlmError> {
        let candidate = resp
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::unknown("No candidates in response"))?;

        let parts: Vec<String> = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .filter(|t| !t.is_empty())
            .collect();

        if parts.is_empty() {
            let reason = candidate.finish_reason.unwrap_or_else(|| "UNKNOWN".to_string());
            return Err(LlmError::unknown(format!(
                "Candidate has no text (finish reason: {reason})"
            )));
        }

        let usage = resp.usage_metadata.unwrap_or_default();
        Ok(LlmResponse {
            parts,
            usage: Usage {
                input_tokens: u64::from(usage.prompt_token_count),
                output_tokens: u64::from(usage.candidates_token_count),
            },
        })
    }
}

#[async_trait]
impl LlmService for GeminiService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let response = self
            .build_request(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            LlmError::network(format!("Failed to read response: {}", e.without_url()))
        })?;

        if !status.is_success() {
            return Err(classify_error(status.as_u16(), &body));
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            LlmError::unknown(format!("Failed to parse response: {e} - body: {body}"))
        })?;

        Self::normalize_response(gemini_response)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Map a send failure to an error. The URL is dropped so error messages
/// never carry endpoint details into logs.
fn transport_error(e: reqwest::Error) -> LlmError {
    let e = e.without_url();
    if e.is_timeout() {
        LlmError::network(format!("Request timeout: {e}"))
    } else if e.is_connect() {
        LlmError::network(format!("Connection failed: {e}"))
    } else {
        LlmError::unknown(format!("Request failed: {e}"))
    }
}

/// Map an HTTP error status and body to a classified error
fn classify_error(status: u16, body: &str) -> LlmError {
    let Ok(error_resp) = serde_json::from_str::<GeminiErrorResponse>(body) else {
        return LlmError::unknown(format!("HTTP {status} error: {body}"));
    };
    let message = error_resp.error.message;
    match status {
        400 => LlmError::invalid_request(format!("Invalid request: {message}")),
        401 | 403 => LlmError::auth(format!("Authentication failed: {message}")),
        429 => LlmError::rate_limit(format!("Rate limit exceeded: {message}")),
        500..=599 => LlmError::server_error(format!("Server error: {message}")),
        _ => LlmError::unknown(format!("HTTP {status}: {message}")),
    }
}

// Gemini API types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GeminiUsageMetadata {
    prompt_token_count: u32,
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}
