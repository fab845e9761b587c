use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use missive_logging::{missive_debug, missive_error, missive_info};

use crate::post::{DispatchSettings, Poster, ReqwestPoster};
use crate::{DispatchError, EngineEvent, FailureKind, MessageId};

enum EngineCommand {
    Dispatch { id: MessageId, content: String },
}

/// Runs outbound calls on a background tokio runtime.
///
/// Every dispatch becomes its own task, so calls settle independently and in
/// any order. There is no retry and no cancellation.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: DispatchSettings) -> Result<Self, DispatchError> {
        let poster = ReqwestPoster::new(settings)?;
        missive_info!("Dispatch endpoint {}", poster.endpoint());
        Ok(Self::with_poster(Arc::new(poster)))
    }

    pub fn with_poster(poster: Arc<dyn Poster>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    missive_error!("Failed to start dispatch runtime: {}", err);
                    let reason = err.to_string();
                    while let Ok(EngineCommand::Dispatch { id, .. }) = cmd_rx.recv() {
                        let result = Err(DispatchError::new(FailureKind::Network, reason.clone()));
                        let _ = event_tx.send(EngineEvent::Completed { id, result });
                    }
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let poster = poster.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(poster.as_ref(), command, event_tx).await;
                });
            }
            // Let in-flight calls finish so their results are still delivered.
            runtime.shutdown_timeout(Duration::from_secs(30));
        });

        Self { cmd_tx, event_rx }
    }

    pub fn dispatch(&self, id: MessageId, content: impl Into<String>) {
        if self
            .cmd_tx
            .send(EngineCommand::Dispatch {
                id,
                content: content.into(),
            })
            .is_err()
        {
            missive_error!("Dispatch runtime is gone; message id={} not sent", id);
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    poster: &dyn Poster,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Dispatch { id, content } => {
            missive_debug!("Dispatch start id={} content_len={}", id, content.len());
            let result = poster.post(&content).await;
            missive_debug!("Dispatch settled id={} ok={}", id, result.is_ok());
            let _ = event_tx.send(EngineEvent::Completed { id, result });
        }
    }
}
