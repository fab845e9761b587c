//! Missive engine: outbound dispatch calls and their async execution.
mod decode;
mod engine;
mod post;
mod types;

pub use decode::decode_reply;
pub use engine::EngineHandle;
pub use post::{DispatchSettings, Poster, ReqwestPoster};
pub use types::{DispatchError, EngineEvent, FailureKind, MessageId, ServerReply};
