//! Events that can occur in a conversation

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Raw text submitted from a chat surface (untrimmed)
    UserSubmit { text: String },

    /// The pending reply settled; `text` is either the model's answer or a
    /// fallback message
    ReplySettled { text: String },
}

impl Event {
    pub fn user_submit(text: impl Into<String>) -> Self {
        Event::UserSubmit { text: text.into() }
    }

    pub fn reply_settled(text: impl Into<String>) -> Self {
        Event::ReplySettled { text: text.into() }
    }
}
