use missive_logging::{missive_debug, missive_warn};

use crate::view_model::{AppViewModel, MessageRowView};
use crate::{DispatchOutcome, Locale};

pub type MessageId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageStatus {
    #[default]
    Pending,
    Success,
    Failure,
}

impl MessageStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub content: String,
    pub status: MessageStatus,
    pub result_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    locale: Locale,
    compose: String,
    input_focused: bool,
    /// Newest first. Entries are never removed or reordered once inserted.
    messages: Vec<Message>,
    next_id: MessageId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_locale(Locale::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locale(locale: Locale) -> Self {
        Self {
            locale,
            compose: String::new(),
            input_focused: false,
            messages: Vec::new(),
            next_id: 1,
            dirty: false,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn compose_text(&self) -> &str {
        &self.compose
    }

    pub fn input_focused(&self) -> bool {
        self.input_focused
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|message| message.id == id)
    }

    pub fn view(&self) -> AppViewModel {
        let messages: Vec<MessageRowView> = self
            .messages
            .iter()
            .map(|message| MessageRowView {
                id: message.id,
                content: message.content.clone(),
                status: message.status,
                result_text: message.result_text.clone(),
            })
            .collect();
        let pending_count = self
            .messages
            .iter()
            .filter(|message| message.status == MessageStatus::Pending)
            .count();
        AppViewModel {
            compose_text: self.compose.clone(),
            input_focused: self.input_focused,
            messages,
            pending_count,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_compose(&mut self, text: String) {
        if self.compose != text {
            self.compose = text;
            self.dirty = true;
        }
    }

    pub(crate) fn focus_input(&mut self) {
        if !self.input_focused {
            self.input_focused = true;
            self.dirty = true;
        }
    }

    /// Creates a pending entry from the compose text and puts it at the head.
    ///
    /// Returns `None` and leaves the state untouched when the text is blank.
    pub fn submit(&mut self) -> Option<(MessageId, String)> {
        if self.compose.trim().is_empty() {
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        let content = std::mem::take(&mut self.compose);
        missive_debug!("Submit id={} content_len={}", id, content.len());

        self.messages.insert(
            0,
            Message {
                id,
                content: content.clone(),
                status: MessageStatus::Pending,
                result_text: self.locale.labels().pending.to_string(),
            },
        );
        self.input_focused = false;
        self.dirty = true;
        Some((id, content))
    }

    /// Applies the settled outcome of `id`'s outbound call.
    ///
    /// The collection is rebuilt from its previous value, replacing only the
    /// matching pending entry. Unknown ids and already-terminal entries are
    /// left as they are.
    pub fn resolve(&mut self, id: MessageId, outcome: &DispatchOutcome) {
        let Some(current) = self.message(id) else {
            missive_warn!("Resolution for unknown message id={}", id);
            return;
        };
        if current.status.is_terminal() {
            missive_warn!(
                "Ignoring second resolution for message id={} (already {:?})",
                id,
                current.status
            );
            return;
        }

        let status = if outcome.is_success() {
            MessageStatus::Success
        } else {
            MessageStatus::Failure
        };
        let result_text = self.locale.labels().result_text(outcome);
        missive_debug!("Resolve id={} status={:?}", id, status);

        self.messages = std::mem::take(&mut self.messages)
            .into_iter()
            .map(|message| {
                if message.id == id {
                    Message {
                        status,
                        result_text: result_text.clone(),
                        ..message
                    }
                } else {
                    message
                }
            })
            .collect();
        self.dirty = true;
    }
}
