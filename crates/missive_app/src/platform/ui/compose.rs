//! Multi-line compose field backed by `tui_textarea`.

use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;
use tui_textarea::{Input, TextArea};

use super::layout::ScreenLabels;

/// An edit applied to the compose field.
#[derive(Debug, Clone, PartialEq)]
pub enum ComposeEdit {
    Key(Input),
    Newline,
    Paste(String),
}

pub struct ComposeField {
    textarea: TextArea<'static>,
    labels: ScreenLabels,
    focused: bool,
}

impl ComposeField {
    pub fn new(labels: ScreenLabels) -> Self {
        Self {
            textarea: styled_textarea(TextArea::default(), &labels, false),
            labels,
            focused: false,
        }
    }

    pub fn apply(&mut self, edit: ComposeEdit) {
        match edit {
            ComposeEdit::Key(input) => {
                self.textarea.input(input);
            }
            ComposeEdit::Newline => {
                self.textarea.insert_newline();
            }
            ComposeEdit::Paste(text) => {
                self.textarea.insert_str(text.replace("\r\n", "\n"));
            }
        }
    }

    pub fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// Replaces the buffer when the state's compose text differs from it.
    ///
    /// Equal text keeps the cursor where it is.
    pub fn sync(&mut self, text: &str, focused: bool) {
        if self.text() != text {
            let textarea = TextArea::from(text.split('\n').map(str::to_owned));
            self.textarea = styled_textarea(textarea, &self.labels, focused);
        } else if self.focused != focused {
            set_cursor_style(&mut self.textarea, focused);
        }
        self.focused = focused;
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }
}

fn styled_textarea(
    mut textarea: TextArea<'static>,
    labels: &ScreenLabels,
    focused: bool,
) -> TextArea<'static> {
    textarea.set_placeholder_text(labels.placeholder);
    textarea.set_cursor_line_style(Style::default());
    textarea.set_block(Block::bordered().title(labels.compose));
    set_cursor_style(&mut textarea, focused);
    textarea
}

fn set_cursor_style(textarea: &mut TextArea<'static>, focused: bool) {
    let style = if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    textarea.set_cursor_style(style);
}
