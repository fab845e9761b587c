//! Keyboard and paste events from crossterm, mapped onto compose edits and messages.

use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use missive_core::Msg;
use missive_logging::{missive_debug, missive_warn};
use tui_textarea::Input;

use super::ui::compose::ComposeEdit;

const READ_POLL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Change the compose buffer.
    Edit(ComposeEdit),
    Submit(Msg),
    Redraw,
    Quit,
    Ignore,
}

pub fn translate(event: Event) -> InputEvent {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Paste(text) => InputEvent::Edit(ComposeEdit::Paste(text)),
        Event::Resize(..) => InputEvent::Redraw,
        _ => InputEvent::Ignore,
    }
}

fn translate_key(key: KeyEvent) -> InputEvent {
    if key.kind != KeyEventKind::Press {
        return InputEvent::Ignore;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => InputEvent::Quit,
        KeyCode::Char('c') if ctrl => InputEvent::Quit,
        KeyCode::Char('s') if ctrl => InputEvent::Submit(Msg::SubmitClicked),
        KeyCode::Enter
            if key
                .modifiers
                .intersects(KeyModifiers::ALT | KeyModifiers::SHIFT | KeyModifiers::CONTROL) =>
        {
            InputEvent::Edit(ComposeEdit::Newline)
        }
        KeyCode::Enter => InputEvent::Submit(Msg::SubmitEditing),
        _ => InputEvent::Edit(ComposeEdit::Key(Input::from(key))),
    }
}

/// Reads terminal events on a background thread.
///
/// The channel disconnects when reading fails for good.
pub fn spawn_event_reader() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || loop {
        match event::poll(READ_POLL) {
            Ok(false) => {}
            Ok(true) => match event::read() {
                Ok(event) => {
                    if tx.send(event).is_err() {
                        return;
                    }
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {
                    missive_debug!("Terminal read interrupted");
                }
                Err(err) => {
                    missive_warn!("Terminal read failed: {}", err);
                    return;
                }
            },
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => {
                missive_warn!("Terminal poll failed: {}", err);
                return;
            }
        }
    });
    rx
}
