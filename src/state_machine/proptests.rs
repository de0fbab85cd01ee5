//! Property-based tests for the state machines
//!
//! These tests verify key invariants hold across all possible inputs.

use super::*;
use crate::workflow::{
    self, options_for, text_entry, Action, Affordance, FormData, WorkflowState,
};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_workflow_state() -> impl Strategy<Value = WorkflowState> {
    (0..WorkflowState::ALL.len()).prop_map(|i| WorkflowState::ALL[i])
}

fn arb_text_state() -> impl Strategy<Value = WorkflowState> {
    let text_states: Vec<WorkflowState> = WorkflowState::ALL
        .into_iter()
        .filter(|s| text_entry(*s).is_some())
        .collect();
    proptest::sample::select(text_states)
}

fn arb_form() -> impl Strategy<Value = FormData> {
    proptest::collection::btree_map("[a-zA-Z]{1,10}", "[a-zA-Z0-9 ]{0,20}", 0..5).prop_map(
        |map| {
            let mut form = FormData::new();
            for (k, v) in map {
                form.insert(k, v);
            }
            form
        },
    )
}

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 @.]{0,30}"
}

fn arb_phase() -> impl Strategy<Value = Phase> {
    prop_oneof![Just(Phase::Idle), Just(Phase::AwaitingReply)]
}

fn arb_session_state() -> impl Strategy<Value = SessionState> {
    (arb_phase(), arb_workflow_state(), arb_form()).prop_map(|(phase, workflow, form)| {
        SessionState {
            phase,
            workflow,
            form,
        }
    })
}

fn arb_user_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        (0usize..6).prop_map(|index| Event::OptionSelected { index }),
        arb_text().prop_map(|text| Event::TextSubmitted { text }),
    ]
}

// ============================================================================
// Workflow properties
// ============================================================================

proptest! {
    #[test]
    fn options_are_stable(state in arb_workflow_state()) {
        prop_assert_eq!(options_for(state), options_for(state));
    }

    #[test]
    fn every_state_offers_something_except_end(state in arb_workflow_state()) {
        let affordance = options_for(state);
        if state == WorkflowState::End {
            prop_assert_eq!(affordance, Affordance::None);
        } else {
            prop_assert!(affordance.accepts_text() || !affordance.buttons().is_empty());
        }
    }

    #[test]
    fn text_rows_write_field_and_advance(
        state in arb_text_state(),
        form in arb_form(),
        text in arb_text(),
    ) {
        let Some(entry) = text_entry(state) else {
            return Err(TestCaseError::fail("generator produced a non-text state"));
        };
        let (next, new_form) = workflow::transition(state, &form, &Action::SubmitText(text.clone()));

        prop_assert_eq!(next, entry.next_state);
        prop_assert_eq!(new_form.get(entry.field), Some(text.as_str()));
    }

    #[test]
    fn form_keys_only_grow(
        state in arb_workflow_state(),
        form in arb_form(),
        index in 0usize..6,
        text in arb_text(),
    ) {
        let mut actions = vec![Action::SubmitText(text)];
        if let Some(option) = options_for(state).option(index) {
            actions.push(Action::SelectOption(*option));
        }

        for action in &actions {
            let (_, new_form) = workflow::transition(state, &form, action);
            for key in form.keys() {
                prop_assert!(new_form.contains_key(key), "lost key {}", key);
            }
        }
    }

    #[test]
    fn text_outside_text_states_changes_nothing(
        state in arb_workflow_state(),
        form in arb_form(),
        text in arb_text(),
    ) {
        prop_assume!(text_entry(state).is_none());
        let (next, new_form) = workflow::transition(state, &form, &Action::SubmitText(text));
        prop_assert_eq!(next, state);
        prop_assert_eq!(new_form, form);
    }
}

// ============================================================================
// Session properties
// ============================================================================

proptest! {
    #[test]
    fn busy_rejects_user_actions(
        state in arb_session_state(),
        event in arb_user_event(),
    ) {
        let busy = SessionState { phase: Phase::AwaitingReply, ..state };
        prop_assert_eq!(transition(&busy, event).unwrap_err(), TransitionError::Busy);
    }

    #[test]
    fn blank_text_changes_nothing(
        state in arb_session_state(),
        blank in "[ \t\n]{0,5}",
    ) {
        let idle = SessionState { phase: Phase::Idle, ..state };
        let err = transition(&idle, Event::TextSubmitted { text: blank }).unwrap_err();
        prop_assert_eq!(err, TransitionError::EmptyInput);
    }

    #[test]
    fn accepted_action_always_requests_one_reply(
        state in arb_session_state(),
        event in arb_user_event(),
    ) {
        let idle = SessionState { phase: Phase::Idle, ..state };
        if let Ok(result) = transition(&idle, event) {
            prop_assert!(result.new_state.is_busy());
            let requests = result
                .effects
                .iter()
                .filter(|e| matches!(e, Effect::RequestReply))
                .count();
            prop_assert_eq!(requests, 1);
        }
    }

    #[test]
    fn reply_never_moves_workflow(
        state in arb_session_state(),
        text in arb_text(),
    ) {
        let busy = SessionState { phase: Phase::AwaitingReply, ..state };
        let result = transition(&busy, Event::ReplyReady { text }).unwrap();
        prop_assert_eq!(result.new_state.workflow, busy.workflow);
        prop_assert_eq!(&result.new_state.form, &busy.form);
        prop_assert_eq!(result.new_state.phase, Phase::Idle);
    }

    /// Random walk: alternate user actions with replies and check the session
    /// stays consistent.
    #[test]
    fn random_walk_stays_consistent(
        events in proptest::collection::vec(arb_user_event(), 1..40),
    ) {
        let mut state = transition(&SessionState::new(), Event::Start)
            .unwrap()
            .new_state;

        for event in events {
            state = transition(&state, Event::ReplyReady { text: "ok".to_string() })
                .unwrap()
                .new_state;
            prop_assert!(!state.is_busy());

            let before = state.clone();
            match transition(&state, event) {
                Ok(result) => {
                    for key in before.form.keys() {
                        prop_assert!(result.new_state.form.contains_key(key));
                    }
                    state = result.new_state;
                }
                Err(TransitionError::UnknownOption { index }) => {
                    prop_assert!(state.affordance().option(index).is_none());
                    // Keep the reply-per-step rhythm of the walk
                    state.phase = Phase::AwaitingReply;
                }
                Err(e) => return Err(TestCaseError::fail(format!("unexpected error: {e}"))),
            }
        }
    }
}
