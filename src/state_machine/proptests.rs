//! Property-based tests for the turn-taking loop
//!
//! The loop must be restart-safe: any number of incorrect-answer cycles may
//! not corrupt conversation state, and the histories only ever grow.

use super::state::{ConversationState, Exchange, TurnState, Verdict};
use super::transition::transition;
use super::{Effect, Event};
use proptest::prelude::*;

const TEXT: &str = "[a-zA-Z0-9 ?!.]{0,40}";

/// One full wrong-answer cycle from `Ask` back to `Ask`.
fn run_wrong_cycle(
    state: TurnState,
    conv: &mut ConversationState,
    question: &str,
    answer: &str,
    comment: &str,
) -> TurnState {
    let r = transition(
        &state,
        conv,
        Event::QuestionReady {
            question: question.to_string(),
            exchange: Exchange::new("ask", question),
        },
    )
    .expect("ask transition");

    let r = transition(
        &r.next_state,
        conv,
        Event::AnswerReceived {
            text: answer.to_string(),
        },
    )
    .expect("answer transition");

    let r = transition(
        &r.next_state,
        conv,
        Event::VerdictReady {
            verdict: Verdict {
                correct: false,
                comment: comment.to_string(),
            },
            exchange: Exchange::new("payload", comment),
        },
    )
    .expect("evaluate transition");

    let r = transition(&r.next_state, conv, Event::Restart).expect("restart transition");
    r.next_state
}

proptest! {
    /// Any number of incorrect cycles leaves the machine back in `Ask` with
    /// a cleared question and exactly one history entry per collaborator
    /// call, nothing more.
    #[test]
    fn wrong_answer_cycles_are_restart_safe(
        turns in prop::collection::vec((TEXT, TEXT, TEXT), 0..8)
    ) {
        let mut conv = ConversationState::new();
        let mut state = TurnState::Ask;

        for (i, (question, answer, comment)) in turns.iter().enumerate() {
            state = run_wrong_cycle(state, &mut conv, question, answer, comment);

            prop_assert_eq!(&state, &TurnState::Ask);
            prop_assert!(conv.current_question().is_none());
            prop_assert_eq!(conv.generator_history().len(), i + 1);
            prop_assert_eq!(conv.evaluator_history().len(), i + 1);
        }
    }

    /// Histories are monotonically non-decreasing across every accepted
    /// transition in a cycle.
    #[test]
    fn histories_never_shrink(
        question in TEXT,
        answer in TEXT,
        comment in TEXT,
    ) {
        let mut conv = ConversationState::new();
        let mut state = TurnState::Ask;
        let mut prev = (0usize, 0usize);

        let events = [
            Event::QuestionReady {
                question: question.clone(),
                exchange: Exchange::new("ask", question),
            },
            Event::AnswerReceived { text: answer },
            Event::VerdictReady {
                verdict: Verdict { correct: false, comment: comment.clone() },
                exchange: Exchange::new("payload", comment),
            },
            Event::Restart,
        ];

        for event in events {
            let r = transition(&state, &mut conv, event).expect("valid cycle event");
            state = r.next_state;

            let lens = (conv.generator_history().len(), conv.evaluator_history().len());
            prop_assert!(lens.0 >= prev.0);
            prop_assert!(lens.1 >= prev.1);
            prev = lens;
        }
    }

    /// A verdict can never be applied before a question was asked: in `Ask`
    /// and `Answer` the machine rejects `VerdictReady` outright.
    #[test]
    fn no_evaluate_before_ask(comment in TEXT, question in TEXT) {
        let mut conv = ConversationState::new();
        let verdict = Event::VerdictReady {
            verdict: Verdict { correct: true, comment: comment.clone() },
            exchange: Exchange::new("payload", comment),
        };

        prop_assert!(transition(&TurnState::Ask, &mut conv, verdict.clone()).is_err());

        let answering = TurnState::Answer { question };
        prop_assert!(transition(&answering, &mut conv, verdict).is_err());

        prop_assert!(conv.evaluator_history().is_empty());
    }

    /// The question is set for the entire Answer -> Evaluate span.
    #[test]
    fn question_set_across_answer_and_evaluate(question in TEXT, answer in TEXT) {
        let mut conv = ConversationState::new();

        let r = transition(
            &TurnState::Ask,
            &mut conv,
            Event::QuestionReady {
                question: question.clone(),
                exchange: Exchange::new("ask", question.clone()),
            },
        )
        .expect("ask transition");
        prop_assert_eq!(conv.current_question(), Some(question.as_str()));

        let r = transition(
            &r.next_state,
            &mut conv,
            Event::AnswerReceived { text: answer },
        )
        .expect("answer transition");
        prop_assert_eq!(conv.current_question(), Some(question.as_str()));
        prop_assert!(
            matches!(r.next_state, TurnState::Evaluate { .. }),
            "expected Evaluate state"
        );
    }
}

#[test]
fn wrong_cycle_effect_order_is_fixed() {
    let mut conv = ConversationState::new();
    let r = transition(
        &TurnState::Ask,
        &mut conv,
        Event::QuestionReady {
            question: "q".to_string(),
            exchange: Exchange::new("ask", "q"),
        },
    )
    .expect("ask transition");

    // Outbound frames are emitted in state-execution order: the question
    // first, then the suspension on the socket.
    assert!(matches!(r.effects[0], Effect::SendText { .. }));
    assert!(matches!(r.effects[1], Effect::AwaitAnswer));
}
