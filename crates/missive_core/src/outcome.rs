/// Status code the remote endpoint uses to signal an accepted message.
pub const SUCCESS_STATUS: f64 = 200.0;

/// How a single outbound call settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The endpoint answered with [`SUCCESS_STATUS`].
    ApplicationSuccess(String),
    /// The endpoint answered with any other status.
    ApplicationFailure(String),
    /// The call failed, timed out, or returned something unparseable.
    TransportFailure,
}

impl DispatchOutcome {
    /// Classifies a structured `{status, message}` reply.
    ///
    /// Only exactly 200 counts as success. Every other number, fractional or
    /// out of integer range included, is an application failure; 4xx and 5xx
    /// are not told apart.
    pub fn from_reply(status: f64, message: impl Into<String>) -> Self {
        if status == SUCCESS_STATUS {
            Self::ApplicationSuccess(message.into())
        } else {
            Self::ApplicationFailure(message.into())
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::ApplicationSuccess(_))
    }
}
