//! Turns a transcript plus new user text into an assistant reply
//!
//! Every outcome is a string. Provider failures are logged here and replaced
//! with a fixed offline message; they never reach the conversation.

use crate::conversation::{Role, Turn};
use crate::llm::{LlmRequest, LlmService, MessageRole};

/// Sampling temperature for every reply
pub const REPLY_TEMPERATURE: f32 = 0.7;

/// Reply used when the provider answers without any text
pub const UNPROCESSED_REPLY: &str = "I'm sorry, I couldn't process that request.";

/// Reply used when the provider call fails for any reason
pub const OFFLINE_REPLY: &str = "The school assistant is currently offline. Please try again later.";

/// Project prior turns and the new user text onto a provider request
pub fn build_request(system_prompt: &str, history: &[Turn], user_text: &str) -> LlmRequest {
    history
        .iter()
        .fold(LlmRequest::new(system_prompt), |request, turn| {
            let role = match turn.role() {
                Role::User => MessageRole::User,
                Role::Model => MessageRole::Assistant,
            };
            request.with_message(role, turn.text())
        })
        .with_message(MessageRole::User, user_text)
        .with_temperature(REPLY_TEMPERATURE)
}

/// Single attempt, no retry.
pub async fn fetch_reply(
    llm: &dyn LlmService,
    system_prompt: &str,
    history: &[Turn],
    user_text: &str,
) -> String {
    let request = build_request(system_prompt, history, user_text);

    match llm.complete(&request).await {
        Ok(response) => {
            let text = response.text();
            if text.is_empty() {
                tracing::warn!(
                    model = llm.model_id(),
                    finish_reason = response.finish_reason.as_deref().unwrap_or("none"),
                    "Reply contained no text"
                );
                UNPROCESSED_REPLY.to_string()
            } else {
                text
            }
        }
        Err(e) => {
            tracing::warn!(
                model = llm.model_id(),
                kind = ?e.kind,
                error = %e,
                "Assistant unavailable, using offline reply"
            );
            OFFLINE_REPLY.to_string()
        }
    }
}
