//! Chat session runtime
//!
//! A `ChatSession` is the command handler behind one chat surface. It owns the
//! surface's `Conversation`, runs one fetch per accepted submission and
//! publishes a transcript snapshot after every mutation.

#[cfg(test)]
pub mod testing;

use crate::conversation::{Conversation, TranscriptView, TransitionError, Turn};
use crate::fetcher::fetch_reply;
use crate::llm::LlmService;
use crate::persona::{build_system_prompt, Surface};
use std::sync::Arc;
use tokio::sync::watch;

pub struct ChatSession {
    surface: Surface,
    conversation: Conversation,
    llm: Arc<dyn LlmService>,
    system_prompt: String,
    transcript_tx: watch::Sender<TranscriptView>,
}

impl ChatSession {
    pub fn new(surface: Surface, llm: Arc<dyn LlmService>) -> Self {
        let conversation = Conversation::new(surface.greeting());
        let (transcript_tx, _) = watch::channel(conversation.view());
        tracing::info!(
            conv_id = %conversation.id(),
            surface = surface.as_str(),
            model = llm.model_id(),
            "Chat session started"
        );
        Self {
            surface,
            conversation,
            llm,
            system_prompt: build_system_prompt(),
            transcript_tx,
        }
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn turns(&self) -> &[Turn] {
        self.conversation.turns()
    }

    #[allow(dead_code)] // API completeness
    pub fn is_awaiting(&self) -> bool {
        self.conversation.is_awaiting()
    }

    /// Receive a snapshot after every transcript mutation
    pub fn subscribe(&self) -> watch::Receiver<TranscriptView> {
        self.transcript_tx.subscribe()
    }

    /// Submit user text and wait for the reply.
    ///
    /// Returns the rejection when the text is blank or a reply is pending.
    /// Otherwise the exchange always completes: the fetcher turns failures
    /// into a fallback reply, so the session cannot stay busy.
    pub async fn submit(&mut self, text: &str) -> Result<&Turn, TransitionError> {
        let pending = self.conversation.append_user_turn(text)?;
        self.publish();

        tracing::debug!(
            conv_id = %self.conversation.id(),
            history = pending.history.len(),
            "Requesting reply"
        );
        let reply = fetch_reply(
            self.llm.as_ref(),
            &self.system_prompt,
            &pending.history,
            &pending.text,
        )
        .await;

        self.conversation.complete_with_model_turn(reply)?;
        self.publish();

        // complete_with_model_turn just appended the reply
        self.conversation
            .turns()
            .last()
            .ok_or(TransitionError::NoRequestInFlight)
    }

    /// Submit one of the surface's quick suggestions by index
    pub async fn submit_suggestion(&mut self, index: usize) -> Option<Result<&Turn, TransitionError>> {
        let question = *self.surface.suggestions().get(index)?;
        Some(self.submit(question).await)
    }

    fn publish(&self) {
        self.transcript_tx.send_replace(self.conversation.view());
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        tracing::debug!(
            conv_id = %self.conversation.id(),
            turns = self.conversation.turns().len(),
            "Chat session closed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MockLlmService;
    use super::*;
    use crate::conversation::Role;
    use crate::fetcher::{OFFLINE_REPLY, UNPROCESSED_REPLY};
    use crate::llm::{LlmError, LlmResponse, MessageRole};

    fn session_with(surface: Surface) -> (ChatSession, Arc<MockLlmService>) {
        let mock = Arc::new(MockLlmService::new("mock-model"));
        let session = ChatSession::new(surface, mock.clone());
        (session, mock)
    }

    #[tokio::test]
    async fn hello_scenario() {
        let (mut session, mock) = session_with(Surface::General);
        mock.queue_text("Hi there");

        let reply = session.submit("Hello").await.unwrap();
        assert_eq!(reply, &Turn::model("Hi there"));
        assert_eq!(
            session.turns(),
            &[
                Turn::model(Surface::General.greeting()),
                Turn::user("Hello"),
                Turn::model("Hi there"),
            ]
        );
        assert!(!session.is_awaiting());
    }

    #[tokio::test]
    async fn request_carries_seed_history_and_persona() {
        let (mut session, mock) = session_with(Surface::Admissions);
        mock.queue_text("January 15, 2024.");

        session.submit("  When is the deadline?  ").await.unwrap();

        let requests = mock.recorded_requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, MessageRole::Assistant);
        assert_eq!(request.messages[0].text, Surface::Admissions.greeting());
        assert_eq!(request.messages[1].role, MessageRole::User);
        assert_eq!(request.messages[1].text, "When is the deadline?");
        assert_eq!(request.system[0].text, build_system_prompt());
    }

    #[tokio::test]
    async fn failure_appends_offline_reply_and_goes_idle() {
        let (mut session, mock) = session_with(Surface::General);
        mock.queue_error(LlmError::network("connection refused"));

        let reply = session.submit("Hello").await.unwrap();
        assert_eq!(reply.text(), OFFLINE_REPLY);
        assert!(!session.is_awaiting());
    }

    #[tokio::test]
    async fn empty_reply_appends_unprocessed_message() {
        let (mut session, mock) = session_with(Surface::General);
        mock.queue_response(LlmResponse::default());

        let reply = session.submit("Hello").await.unwrap();
        assert_eq!(reply.text(), UNPROCESSED_REPLY);
    }

    #[tokio::test]
    async fn blank_submission_makes_no_request() {
        let (mut session, mock) = session_with(Surface::General);

        let err = session.submit("   ").await.unwrap_err();
        assert_eq!(err, TransitionError::EmptyMessage);
        assert_eq!(session.turns().len(), 1);
        assert!(mock.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn transcript_grows_by_two_per_exchange() {
        let (mut session, mock) = session_with(Surface::General);
        for i in 0..4 {
            mock.queue_text(format!("answer {i}"));
            session.submit(&format!("question {i}")).await.unwrap();
        }
        assert_eq!(session.turns().len(), 1 + 2 * 4);
        // The last request carried the whole previous transcript
        assert_eq!(mock.recorded_requests()[3].messages.len(), 1 + 2 * 3 + 1);
    }

    #[tokio::test]
    async fn subscribers_see_each_mutation() {
        let (mut session, mock) = session_with(Surface::General);
        let mut rx = session.subscribe();
        assert_eq!(rx.borrow_and_update().turns.len(), 1);

        mock.queue_text("Hi there");
        session.submit("Hello").await.unwrap();

        assert!(rx.has_changed().unwrap());
        let view = rx.borrow_and_update().clone();
        assert_eq!(view.turns.len(), 3);
        assert!(!view.awaiting);
        assert_eq!(view.turns.last().map(Turn::role), Some(Role::Model));
    }

    #[tokio::test]
    async fn suggestion_submits_question_text() {
        let (mut session, mock) = session_with(Surface::Admissions);
        mock.queue_text("Yes, 30% of students receive aid.");

        let reply = session.submit_suggestion(1).await.unwrap().unwrap();
        assert_eq!(reply.text(), "Yes, 30% of students receive aid.");
        assert_eq!(session.turns()[1], Turn::user("Is financial aid available?"));

        assert!(session.submit_suggestion(7).await.is_none());
    }

    #[tokio::test]
    async fn general_surface_has_no_suggestions() {
        let (mut session, mock) = session_with(Surface::General);
        assert!(session.submit_suggestion(0).await.is_none());
        assert!(mock.recorded_requests().is_empty());
    }
}
