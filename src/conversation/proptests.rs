//! Property-based tests for the conversation state machine
//!
//! These tests verify key invariants hold across arbitrary submission sequences.

use super::*;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_blank_text() -> impl Strategy<Value = String> {
    "[ \t\n\r]{0,8}"
}

fn arb_message_text() -> impl Strategy<Value = String> {
    "[ ]{0,3}[a-zA-Z0-9?!.,]{1,30}[ ]{0,3}"
}

fn arb_reply_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?]{0,60}"
}

fn arb_state() -> impl Strategy<Value = ConvState> {
    prop_oneof![Just(ConvState::Idle), Just(ConvState::AwaitingResponse)]
}

/// One step a chat surface could take
#[derive(Debug, Clone)]
enum Step {
    Submit(String),
    Settle(String),
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        arb_message_text().prop_map(Step::Submit),
        arb_blank_text().prop_map(Step::Submit),
        arb_reply_text().prop_map(Step::Settle),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn completed_exchanges_grow_transcript_by_two(
        exchanges in proptest::collection::vec((arb_message_text(), arb_reply_text()), 0..20)
    ) {
        let mut conv = Conversation::new("Hello");
        for (question, answer) in &exchanges {
            conv.append_user_turn(question).unwrap();
            conv.complete_with_model_turn(answer.clone()).unwrap();
            prop_assert!(!conv.is_awaiting());
        }
        prop_assert_eq!(conv.turns().len(), 1 + 2 * exchanges.len());
    }

    #[test]
    fn blank_text_never_appends(blank in arb_blank_text()) {
        let mut conv = Conversation::new("Hello");
        prop_assert_eq!(conv.append_user_turn(&blank), Err(TransitionError::EmptyMessage));
        prop_assert_eq!(conv.turns().len(), 1);
        prop_assert!(!conv.is_awaiting());
    }

    #[test]
    fn submit_while_awaiting_is_noop(first in arb_message_text(), second in arb_message_text()) {
        let mut conv = Conversation::new("Hello");
        conv.append_user_turn(&first).unwrap();
        let before = conv.view();

        prop_assert_eq!(conv.append_user_turn(&second), Err(TransitionError::AwaitingResponse));
        prop_assert_eq!(conv.view(), before);
    }

    #[test]
    fn settle_always_returns_to_idle(reply in arb_reply_text()) {
        let result = transition(&ConvState::AwaitingResponse, Event::reply_settled(reply.clone())).unwrap();
        prop_assert_eq!(result.new_state, ConvState::Idle);
        prop_assert_eq!(&result.effects[0], &Effect::AppendTurn(Turn::model(reply)));
    }

    #[test]
    fn transition_is_deterministic(state in arb_state(), step in arb_step()) {
        let event = match &step {
            Step::Submit(t) => Event::user_submit(t.clone()),
            Step::Settle(t) => Event::reply_settled(t.clone()),
        };
        let a = transition(&state, event.clone());
        let b = transition(&state, event);
        match (a, b) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.new_state, b.new_state);
                prop_assert_eq!(a.effects, b.effects);
            }
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "transition diverged"),
        }
    }

    #[test]
    fn transcript_is_append_only_under_any_steps(
        steps in proptest::collection::vec(arb_step(), 0..40)
    ) {
        let mut conv = Conversation::new("Hello");
        let mut expected_awaiting = false;

        for step in steps {
            let before = conv.turns().to_vec();
            let accepted = match step {
                Step::Submit(text) => conv.append_user_turn(&text).is_ok(),
                Step::Settle(text) => conv.complete_with_model_turn(text).is_ok(),
            };

            // Existing turns never change; accepted steps add exactly one
            prop_assert_eq!(&conv.turns()[..before.len()], before.as_slice());
            let added = conv.turns().len() - before.len();
            prop_assert_eq!(added, usize::from(accepted));
            if accepted {
                expected_awaiting = !expected_awaiting;
                let last = conv.turns().last().unwrap();
                let expected_role = if expected_awaiting { Role::User } else { Role::Model };
                prop_assert_eq!(last.role(), expected_role);
            }
            prop_assert_eq!(conv.is_awaiting(), expected_awaiting);
        }
    }
}
