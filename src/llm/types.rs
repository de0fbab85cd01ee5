//! Common types for text generation

/// A single-turn text generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmRequest {
    pub prompt: String,
    pub max_tokens: Option<u32>,
}

impl LlmRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: None,
        }
    }

    /// Cap the length of the generated text
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Generated text
#[derive(Debug, Clone, Default)]
pub struct LlmResponse {
    /// Text parts in the order the provider returned them
    pub parts: Vec<String>,
    pub usage: Usage,
}

impl LlmResponse {
    pub fn text(s: impl Into<String>) -> Self {
        Self {
            parts: vec![s.into()],
            usage: Usage::default(),
        }
    }

    /// All text parts joined
    pub fn joined(&self) -> String {
        self.parts.concat()
    }
}

/// Usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}
