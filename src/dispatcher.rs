//! Prompt dispatcher
//!
//! Turns (state, transcript, form data) into one outbound generation request.
//! Failures never reach the caller: they are logged for operators and the
//! user sees a fixed apology, after which the conversation carries on.

use crate::llm::{LlmRequest, LlmService};
use crate::prompt::build_prompt;
use crate::transcript::Message;
use crate::workflow::{FormData, WorkflowState};
use std::sync::Arc;

/// Reply used whenever the generation service fails
pub const FALLBACK_REPLY: &str =
    "I'm sorry, I'm having trouble connecting right now. Please try again in a moment.";

/// Output cap for one reply; replies are a few sentences
pub const REPLY_MAX_TOKENS: u32 = 1024;

#[derive(Clone)]
pub struct Dispatcher {
    llm: Arc<dyn LlmService>,
}

impl Dispatcher {
    pub fn new(llm: Arc<dyn LlmService>) -> Self {
        Self { llm }
    }

    pub fn model_id(&self) -> &str {
        self.llm.model_id()
    }

    /// Generate the bot reply for `state`. Exactly one request, no retry.
    pub async fn get_response(
        &self,
        state: WorkflowState,
        transcript: &[Message],
        form: &FormData,
    ) -> String {
        let request =
            LlmRequest::new(build_prompt(state, transcript, form)).with_max_tokens(REPLY_MAX_TOKENS);

        match self.llm.complete(&request).await {
            Ok(response) => response.joined().trim().to_string(),
            Err(e) => {
                tracing::error!(
                    state = %state,
                    kind = ?e.kind,
                    error = %e,
                    "Reply generation failed, sending fallback"
                );
                FALLBACK_REPLY.to_string()
            }
        }
    }
}
