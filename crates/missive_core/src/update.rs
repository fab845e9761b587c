use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_compose(text);
            Vec::new()
        }
        Msg::InputFocused => {
            state.focus_input();
            Vec::new()
        }
        Msg::SubmitClicked | Msg::SubmitEditing => match state.submit() {
            Some((id, content)) => vec![Effect::Dispatch { id, content }],
            None => Vec::new(),
        },
        Msg::DispatchResolved { id, outcome } => {
            state.resolve(id, &outcome);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
