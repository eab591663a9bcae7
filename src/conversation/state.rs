//! Transcript and conversation state types

use serde::{Deserialize, Serialize};

/// Originator of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One message in a transcript. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Conversation state
///
/// `AwaitingResponse` is the only state that rejects submissions; it is left
/// as soon as the pending reply settles, whatever its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvState {
    #[default]
    Idle,
    AwaitingResponse,
}

impl ConvState {
    pub fn is_awaiting(self) -> bool {
        matches!(self, ConvState::AwaitingResponse)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConvState::Idle => "idle",
            ConvState::AwaitingResponse => "awaiting_response",
        }
    }
}

/// Snapshot of a transcript, published after every mutation for rendering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptView {
    pub turns: Vec<Turn>,
    pub awaiting: bool,
}
