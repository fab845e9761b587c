use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::event::Event;
use log::LevelFilter;
use missive_core::{AppState, Msg, Store};
use missive_logging::{missive_error, missive_info};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::input::{self, InputEvent};
use super::logging::{self, LogDestination};
use super::terminal::TerminalSession;
use super::ui::render::{with_screen, Screen, SharedScreen, TerminalView};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

pub fn run_app() -> anyhow::Result<()> {
    let loaded = match AppConfig::load() {
        Ok(loaded) => loaded,
        Err(err) => {
            // No config means no log settings yet; record the failure in the default file.
            logging::initialize(LogDestination::File, LevelFilter::Info);
            missive_error!("Configuration failed: {}", err);
            return Err(err.into());
        }
    };
    let config = loaded.config;
    logging::initialize(
        config.log_destination,
        missive_logging::parse_level(&config.log_level),
    );
    match &loaded.source {
        Some(path) => missive_info!("Loaded config from {:?}", path),
        None => missive_info!("No config file found; using defaults"),
    }

    let locale = config.resolve_locale();
    missive_info!("Starting missive locale={:?}", locale);
    let runner = EffectRunner::new(config.dispatch_settings()).inspect_err(|err| {
        missive_error!("Dispatch setup failed: {}", err);
    })?;

    let mut stdout = io::stdout();
    let session = TerminalSession::enter(&mut stdout)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    let screen = Arc::new(Mutex::new(Screen::new(terminal, locale, config.color)));

    let mut store = Store::new(AppState::with_locale(locale));
    store.subscribe(Box::new(TerminalView::new(screen.clone())));

    let events = input::spawn_event_reader();
    event_loop(&mut store, &runner, &screen, &events);
    drop(session);

    let pending = store.state().view().pending_count;
    missive_info!("Exiting with {} message(s) still pending", pending);
    Ok(())
}

/// Single owner of all state mutation: terminal events and engine completions
/// are interleaved here, one message at a time.
///
/// The screen lock is never held across `Store::dispatch`, since the
/// subscriber takes it too.
fn event_loop<B: Backend>(
    store: &mut Store,
    runner: &EffectRunner,
    screen: &SharedScreen<B>,
    events: &mpsc::Receiver<Event>,
) {
    loop {
        for msg in runner.drain() {
            dispatch(store, runner, msg);
        }

        let event = match events.recv_timeout(POLL_INTERVAL) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => return,
        };
        match input::translate(event) {
            InputEvent::Quit => return,
            InputEvent::Edit(edit) => {
                let text = with_screen(screen, |screen| {
                    screen.compose_mut().apply(edit);
                    screen.compose().text()
                });
                dispatch(store, runner, Msg::InputChanged(text));
                dispatch(store, runner, Msg::InputFocused);
                // Cursor moves leave the state untouched but still need a frame.
                with_screen(screen, Screen::redraw);
            }
            InputEvent::Submit(msg) => dispatch(store, runner, msg),
            InputEvent::Redraw => with_screen(screen, Screen::redraw),
            InputEvent::Ignore => {}
        }
    }
}

fn dispatch(store: &mut Store, runner: &EffectRunner, msg: Msg) {
    let effects = store.dispatch(msg);
    runner.enqueue(effects);
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Instant;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use missive_core::{AppViewModel, Locale, MessageStatus, ViewSubscriber};
    use missive_engine::{DispatchError, EngineHandle, Poster, ServerReply};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::platform::ui::render::test_support::test_screen;

    struct ShoutingPoster;

    #[async_trait::async_trait]
    impl Poster for ShoutingPoster {
        async fn post(&self, content: &str) -> Result<ServerReply, DispatchError> {
            if content == "second" {
                return Ok(ServerReply {
                    status: 500.0,
                    message: "quota".to_string(),
                });
            }
            Ok(ServerReply {
                status: 200.0,
                message: content.to_uppercase(),
            })
        }
    }

    #[derive(Clone, Default)]
    struct LastView(Arc<Mutex<AppViewModel>>);

    impl LastView {
        fn get(&self) -> AppViewModel {
            self.0.lock().unwrap().clone()
        }
    }

    impl ViewSubscriber for LastView {
        fn on_view(&mut self, view: &AppViewModel) {
            *self.0.lock().unwrap() = view.clone();
        }
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn typed(text: &str) -> impl Iterator<Item = Event> + '_ {
        text.chars()
            .map(|ch| key(KeyCode::Char(ch), KeyModifiers::NONE))
    }

    #[test]
    fn event_loop_applies_input_and_completions_until_quit() {
        let runner = EffectRunner::with_engine(EngineHandle::with_poster(Arc::new(ShoutingPoster)));
        let screen = Arc::new(Mutex::new(test_screen(Locale::English)));
        let mut store = Store::new(AppState::new());
        let last = LastView::default();
        store.subscribe(Box::new(last.clone()));
        store.subscribe(Box::new(TerminalView::new(screen.clone())));

        let (tx, rx) = mpsc::channel();
        let script = typed("first")
            .chain([key(KeyCode::Enter, KeyModifiers::ALT)])
            .chain(typed("line"))
            .chain([key(KeyCode::Enter, KeyModifiers::NONE)])
            // Blank submit is a no-op.
            .chain(typed("  "))
            .chain([key(KeyCode::Enter, KeyModifiers::NONE)])
            .chain([key(KeyCode::Backspace, KeyModifiers::NONE)])
            .chain([key(KeyCode::Backspace, KeyModifiers::NONE)])
            .chain(typed("second"))
            .chain([key(KeyCode::Char('s'), KeyModifiers::CONTROL)]);
        for event in script {
            tx.send(event).unwrap();
        }

        // Quit only once both dispatches have settled.
        let watcher = {
            let last = last.clone();
            thread::spawn(move || {
                let deadline = Instant::now() + Duration::from_secs(10);
                while Instant::now() < deadline {
                    let view = last.get();
                    if view.messages.len() == 2 && view.pending_count == 0 {
                        break;
                    }
                    thread::sleep(Duration::from_millis(5));
                }
                let _ = tx.send(key(KeyCode::Esc, KeyModifiers::NONE));
            })
        };
        event_loop(&mut store, &runner, &screen, &rx);
        watcher.join().unwrap();

        let view = last.get();
        let rows: Vec<_> = view
            .messages
            .iter()
            .map(|row| (row.content.as_str(), row.status, row.result_text.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("second", MessageStatus::Failure, "❌ Error: quota"),
                ("first\nline", MessageStatus::Success, "✅ FIRST\nLINE"),
            ]
        );
        assert_eq!(view.pending_count, 0);
        assert_eq!(view.compose_text, "");
        with_screen(&screen, |screen| assert_eq!(screen.compose().text(), ""));
    }

    #[test]
    fn closed_event_stream_ends_the_loop() {
        let runner = EffectRunner::with_engine(EngineHandle::with_poster(Arc::new(ShoutingPoster)));
        let screen = Arc::new(Mutex::new(test_screen(Locale::English)));
        let mut store = Store::new(AppState::new());

        let (tx, rx) = mpsc::channel();
        tx.send(Event::Paste("draft".to_string())).unwrap();
        drop(tx);
        event_loop(&mut store, &runner, &screen, &rx);

        assert_eq!(store.state().compose_text(), "draft");
        assert!(store.state().messages().is_empty());
    }
}
