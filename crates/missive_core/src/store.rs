//! Explicit subscription between the controller state and its presentation.

use crate::{update, AppState, AppViewModel, Effect, Msg};

/// Receives a fresh projection every time the state changes.
pub trait ViewSubscriber {
    fn on_view(&mut self, view: &AppViewModel);
}

/// Owns the [`AppState`] and fans out view projections to subscribers.
#[derive(Default)]
pub struct Store {
    state: AppState,
    subscribers: Vec<Box<dyn ViewSubscriber + Send>>,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Registers `subscriber` and immediately hands it the current view.
    pub fn subscribe(&mut self, mut subscriber: Box<dyn ViewSubscriber + Send>) {
        subscriber.on_view(&self.state.view());
        self.subscribers.push(subscriber);
    }

    /// Runs `msg` through [`update`] and notifies subscribers if anything changed.
    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        if was_dirty {
            let view = self.state.view();
            for subscriber in &mut self.subscribers {
                subscriber.on_view(&view);
            }
        }
        effects
    }
}
