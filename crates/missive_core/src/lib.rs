//! Missive core: pure dispatch state machine and view-model helpers.
mod effect;
mod locale;
mod msg;
mod outcome;
mod state;
mod store;
mod update;
mod view_model;

pub use effect::Effect;
pub use locale::{Locale, StatusLabels};
pub use msg::Msg;
pub use outcome::{DispatchOutcome, SUCCESS_STATUS};
pub use state::{AppState, Message, MessageId, MessageStatus};
pub use store::{Store, ViewSubscriber};
pub use update::update;
pub use view_model::{AppViewModel, MessageRowView};
