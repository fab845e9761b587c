use crate::MessageId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue exactly one outbound call carrying `content`, tagged with `id`.
    Dispatch { id: MessageId, content: String },
}
