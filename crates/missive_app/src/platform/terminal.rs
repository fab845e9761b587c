//! Raw mode and alternate screen for the lifetime of the UI.

use std::io::{self, Write};
use std::panic;

use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};

/// Restores the terminal when dropped, including during a panic.
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub fn enter<W: Write>(out: &mut W) -> io::Result<Self> {
        enable_raw_mode()?;
        // From here on a partial setup is still undone by Drop.
        let session = Self { _private: () };
        execute!(out, EnterAlternateScreen, EnableBracketedPaste)?;
        install_panic_hook();
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore();
    }
}

fn restore() {
    let mut out = io::stdout();
    let _ = execute!(out, DisableBracketedPaste, LeaveAlternateScreen);
    let _ = disable_raw_mode();
    let _ = out.flush();
}

/// Leaves the alternate screen before the panic message is printed.
fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore();
        previous(info);
    }));
}
