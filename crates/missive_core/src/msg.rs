#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the compose field.
    InputChanged(String),
    /// The compose field gained focus.
    InputFocused,
    /// User pressed the send button.
    SubmitClicked,
    /// User hit "done" on the compose field.
    SubmitEditing,
    /// The outbound call for `id` settled.
    DispatchResolved {
        id: crate::MessageId,
        outcome: crate::DispatchOutcome,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
