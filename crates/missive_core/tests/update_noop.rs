use missive_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn taking_a_view_leaves_the_dirty_flag_alone() {
    let (mut state, _) = update(AppState::new(), Msg::InputChanged("draft".to_string()));

    let view = state.view();
    assert_eq!(view.compose_text, "draft");
    assert!(state.consume_dirty());

    let _ = state.view();
    assert!(!state.consume_dirty());
}
