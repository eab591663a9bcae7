//! Chat transcript state machine
//!
//! Pure transitions decide what happens; `Conversation` applies their effects
//! to an owned transcript. Each chat surface owns its own instance.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{ConvState, Role, TranscriptView, Turn};
pub use transition::{transition, TransitionError};

use uuid::Uuid;

/// Work handed to the fetcher after a user turn is accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    /// Transcript as it was before the new user turn
    pub history: Vec<Turn>,
    /// Trimmed user text
    pub text: String,
}

/// Ordered transcript plus in-flight flag for one chat surface
#[derive(Debug, Clone)]
pub struct Conversation {
    id: Uuid,
    turns: Vec<Turn>,
    state: ConvState,
}

impl Conversation {
    /// Start a conversation seeded with the surface's greeting
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            turns: vec![Turn::model(greeting)],
            state: ConvState::Idle,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    #[allow(dead_code)] // API completeness
    pub fn state(&self) -> ConvState {
        self.state
    }

    pub fn is_awaiting(&self) -> bool {
        self.state.is_awaiting()
    }

    pub fn view(&self) -> TranscriptView {
        TranscriptView {
            turns: self.turns.clone(),
            awaiting: self.is_awaiting(),
        }
    }

    /// Accept a user submission.
    ///
    /// Rejects empty or whitespace-only text and any submission while a reply
    /// is pending; a rejected call leaves the conversation untouched.
    pub fn append_user_turn(&mut self, text: &str) -> Result<PendingReply, TransitionError> {
        let history = self.turns.clone();
        let mut pending = None;
        self.apply(Event::user_submit(text), |effect| {
            if let Effect::RequestReply { text } = effect {
                pending = Some(text.clone());
            }
        })?;

        // The Idle + UserSubmit transition always requests a reply
        let text = pending.unwrap_or_default();
        Ok(PendingReply { history, text })
    }

    /// Record the settled reply and leave `AwaitingResponse`
    pub fn complete_with_model_turn(&mut self, text: impl Into<String>) -> Result<(), TransitionError> {
        self.apply(Event::reply_settled(text), |_| {})
    }

    fn apply(
        &mut self,
        event: Event,
        mut on_effect: impl FnMut(&Effect),
    ) -> Result<(), TransitionError> {
        let result = transition(&self.state, event).inspect_err(|e| {
            tracing::debug!(conv_id = %self.id, state = self.state.as_str(), error = %e, "Transition rejected");
        })?;

        for effect in &result.effects {
            if let Effect::AppendTurn(turn) = effect {
                self.turns.push(turn.clone());
            }
            on_effect(effect);
        }
        self.state = result.new_state;
        Ok(())
    }
}
