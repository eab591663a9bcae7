//! Effects produced by state transitions

use super::state::Turn;

/// Effects to be applied after a state transition, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a turn to the transcript
    AppendTurn(Turn),

    /// Ask the fetcher for a reply to `text`
    RequestReply { text: String },
}
