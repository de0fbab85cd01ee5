//! Provider configuration
//!
//! Reads the credential and model settings from the environment and builds
//! the service used by the dispatcher. A missing credential is not fatal: the
//! server still starts, and every request fails with an auth error.

use super::gemini::{GeminiService, DEFAULT_MODEL, GATEWAY_KEY};
use super::{LlmError, LlmRequest, LlmResponse, LlmService, LoggingService};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Default HTTP timeout for generation requests
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for the text generation provider
#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    /// Gateway base URL; the gateway handles authentication
    pub gateway: Option<String>,
    pub model: Option<String>,
    pub timeout: Option<Duration>,
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("API_KEY")
                .or_else(|_| std::env::var("GEMINI_API_KEY"))
                .ok()
                .filter(|k| !k.trim().is_empty()),
            gateway: std::env::var("LLM_GATEWAY").ok(),
            model: std::env::var("GEMINI_MODEL").ok(),
            timeout: std::env::var("LLM_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs),
        }
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Whether requests can be authenticated at all
    pub fn has_credentials(&self) -> bool {
        self.gateway.is_some() || self.api_key.is_some()
    }

    /// Build the provider, wrapped with request logging
    pub fn build_service(&self) -> Arc<dyn LlmService> {
        Arc::new(LoggingService::new(self.build_provider()))
    }

    fn build_provider(&self) -> Arc<dyn LlmService> {
        let model = self.model();
        let api_key = match (&self.gateway, &self.api_key) {
            (Some(_), _) => GATEWAY_KEY.to_string(),
            (None, Some(key)) => key.clone(),
            (None, None) => {
                return Arc::new(UnconfiguredService::new(
                    model,
                    "API_KEY environment variable not set",
                ))
            }
        };

        match GeminiService::new(
            api_key,
            model,
            self.gateway.as_deref(),
            self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        ) {
            Ok(service) => Arc::new(service),
            Err(e) => Arc::new(UnconfiguredService::new(model, e.message)),
        }
    }
}

/// Stand-in provider when no usable credential or client exists
pub struct UnconfiguredService {
    model_id: String,
    reason: String,
}

impl UnconfiguredService {
    pub fn new(model_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl LlmService for UnconfiguredService {
    async fn complete(&self, _request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        Err(LlmError::auth(self.reason.clone()))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
