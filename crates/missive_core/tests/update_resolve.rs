use std::sync::Once;

use missive_core::{
    update, AppState, DispatchOutcome, Effect, Locale, MessageId, MessageStatus, Msg,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(missive_logging::initialize_for_tests);
}

fn submit_text(state: AppState, input: &str) -> (AppState, MessageId) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    let (state, effects) = update(state, Msg::SubmitClicked);
    let id = effects
        .iter()
        .map(|effect| match effect {
            Effect::Dispatch { id, .. } => *id,
        })
        .next()
        .expect("dispatch effect");
    (state, id)
}

fn resolve(state: AppState, id: MessageId, outcome: DispatchOutcome) -> AppState {
    let (state, effects) = update(state, Msg::DispatchResolved { id, outcome });
    assert!(effects.is_empty());
    state
}

#[test]
fn success_marks_entry_and_carries_server_message() {
    init_logging();
    let (state, id) = submit_text(AppState::new(), "hello");
    let mut state = resolve(
        state,
        id,
        DispatchOutcome::ApplicationSuccess("saved".to_string()),
    );

    let message = state.message(id).unwrap();
    assert_eq!(message.content, "hello");
    assert_eq!(message.status, MessageStatus::Success);
    assert!(message.result_text.contains("saved"));
    assert_eq!(message.result_text, "✅ saved");
    assert!(state.consume_dirty());
}

#[test]
fn application_failure_carries_server_message() {
    init_logging();
    let (state, id) = submit_text(AppState::new(), "x");
    let state = resolve(
        state,
        id,
        DispatchOutcome::ApplicationFailure("rejected".to_string()),
    );

    let message = state.message(id).unwrap();
    assert_eq!(message.status, MessageStatus::Failure);
    assert_eq!(message.result_text, "❌ Error: rejected");
}

#[test]
fn transport_failure_uses_generic_text() {
    init_logging();
    let (state, id) = submit_text(AppState::with_locale(Locale::Japanese), "x");
    let state = resolve(state, id, DispatchOutcome::TransportFailure);

    let message = state.message(id).unwrap();
    assert_eq!(message.status, MessageStatus::Failure);
    assert_eq!(message.result_text, "❌ 通信エラー");
}

#[test]
fn resolving_older_entry_leaves_newer_head_untouched() {
    init_logging();
    let (state, id_a) = submit_text(AppState::new(), "a");
    let (state, id_b) = submit_text(state, "b");

    let before_b = state.messages()[0].clone();
    assert_eq!(before_b.id, id_b);
    assert_eq!(state.messages()[1].id, id_a);

    let state = resolve(state, id_a, DispatchOutcome::TransportFailure);

    assert_eq!(state.messages()[0], before_b);
    assert_eq!(state.messages()[0].status, MessageStatus::Pending);
    assert_eq!(state.messages()[1].id, id_a);
    assert_eq!(state.messages()[1].status, MessageStatus::Failure);
}

#[test]
fn resolution_changes_exactly_one_entry() {
    init_logging();
    let mut state = AppState::new();
    let mut ids = Vec::new();
    for text in ["one", "two", "three", "four"] {
        let (next, id) = submit_text(state, text);
        state = next;
        ids.push(id);
    }
    let before = state.messages().to_vec();

    let target = ids[2];
    let state = resolve(
        state,
        target,
        DispatchOutcome::ApplicationSuccess("ok".to_string()),
    );

    assert_eq!(state.messages().len(), before.len());
    for (old, new) in before.iter().zip(state.messages()) {
        assert_eq!(old.id, new.id);
        assert_eq!(old.content, new.content);
        if old.id == target {
            assert_eq!(new.status, MessageStatus::Success);
        } else {
            assert_eq!(old, new);
        }
    }
}

#[test]
fn out_of_order_resolutions_commute() {
    init_logging();
    let (state, id_a) = submit_text(AppState::new(), "a");
    let (state, id_b) = submit_text(state, "b");

    let ok = DispatchOutcome::ApplicationSuccess("ok".to_string());
    let bad = DispatchOutcome::ApplicationFailure("bad".to_string());

    let forward = resolve(resolve(state.clone(), id_a, ok.clone()), id_b, bad.clone());
    let backward = resolve(resolve(state, id_b, bad), id_a, ok);

    assert_eq!(forward.messages(), backward.messages());
}

#[test]
fn resolution_after_later_submission_still_applies() {
    init_logging();
    let (state, id_a) = submit_text(AppState::new(), "a");
    let (state, _id_b) = submit_text(state, "b");
    let (state, _id_c) = submit_text(state, "c");

    let state = resolve(
        state,
        id_a,
        DispatchOutcome::ApplicationSuccess("late".to_string()),
    );

    assert_eq!(state.messages()[2].id, id_a);
    assert_eq!(state.messages()[2].status, MessageStatus::Success);
    assert_eq!(state.view().pending_count, 2);
}

#[test]
fn unknown_id_leaves_state_unchanged() {
    init_logging();
    let (mut state, id) = submit_text(AppState::new(), "hello");
    state.consume_dirty();
    let before = state.clone();

    let mut after = resolve(
        state,
        id + 100,
        DispatchOutcome::ApplicationSuccess("ghost".to_string()),
    );

    assert_eq!(after, before);
    assert!(!after.consume_dirty());
}

#[test]
fn terminal_status_never_changes() {
    init_logging();
    let (state, id) = submit_text(AppState::new(), "hello");
    let mut state = resolve(
        state,
        id,
        DispatchOutcome::ApplicationSuccess("first".to_string()),
    );
    state.consume_dirty();
    let before = state.clone();

    let mut after = resolve(state, id, DispatchOutcome::TransportFailure);

    assert_eq!(after, before);
    assert_eq!(after.message(id).unwrap().result_text, "✅ first");
    assert!(!after.consume_dirty());
}

#[test]
fn reply_classification_is_binary() {
    assert_eq!(
        DispatchOutcome::from_reply(200.0, "ok"),
        DispatchOutcome::ApplicationSuccess("ok".to_string())
    );
    for status in [201.0, 400.0, 404.0, 500.0, 0.0, -1.0, 200.5, 1e300, 18446744073709551615.0] {
        assert_eq!(
            DispatchOutcome::from_reply(status, "nope"),
            DispatchOutcome::ApplicationFailure("nope".to_string()),
            "status {status}"
        );
    }
}
