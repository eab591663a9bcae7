//! Pure state transition function

use super::state::Turn;
use super::{ConvState, Effect, Event};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConvState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConvState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Reasons a transition is rejected. A rejected transition changes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Message is empty")]
    EmptyMessage,
    #[error("Assistant is still answering the previous message")]
    AwaitingResponse,
    #[error("No reply is pending")]
    NoRequestInFlight,
}

/// Pure transition function: same inputs, same outputs, no I/O.
pub fn transition(state: &ConvState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        (ConvState::Idle, Event::UserSubmit { text }) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(TransitionError::EmptyMessage);
            }
            Ok(TransitionResult::new(ConvState::AwaitingResponse)
                .with_effect(Effect::AppendTurn(Turn::user(text)))
                .with_effect(Effect::RequestReply {
                    text: text.to_string(),
                }))
        }

        (ConvState::AwaitingResponse, Event::UserSubmit { .. }) => {
            Err(TransitionError::AwaitingResponse)
        }

        // Stored verbatim, including fallback messages and empty text
        (ConvState::AwaitingResponse, Event::ReplySettled { text }) => {
            Ok(TransitionResult::new(ConvState::Idle).with_effect(Effect::AppendTurn(Turn::model(text))))
        }

        (ConvState::Idle, Event::ReplySettled { .. }) => Err(TransitionError::NoRequestInFlight),
    }
}
