use crate::{MessageId, MessageStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub compose_text: String,
    pub input_focused: bool,
    /// Newest first, same order as the underlying collection.
    pub messages: Vec<MessageRowView>,
    pub pending_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRowView {
    pub id: MessageId,
    pub content: String,
    pub status: MessageStatus,
    pub result_text: String,
}
