use serde::Deserialize;

use crate::{DispatchError, FailureKind, ServerReply};

#[derive(Debug, Deserialize)]
struct WireReply {
    status: f64,
    message: String,
}

/// Decodes a `{"status": <number>, "message": <string>}` body.
///
/// The HTTP status line is not consulted; the JSON body alone decides. Any
/// JSON number is a valid status. A non-numeric status, a missing field or a
/// body that is not JSON is a [`FailureKind::MalformedResponse`].
pub fn decode_reply(body: &[u8]) -> Result<ServerReply, DispatchError> {
    let wire: WireReply = serde_json::from_slice(body)
        .map_err(|err| DispatchError::new(FailureKind::MalformedResponse, err.to_string()))?;

    Ok(ServerReply {
        status: wire.status,
        message: wire.message,
    })
}
