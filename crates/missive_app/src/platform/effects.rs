use missive_core::{DispatchOutcome, Effect, Msg};
use missive_engine::{DispatchError, DispatchSettings, EngineEvent, EngineHandle};
use missive_logging::{missive_info, missive_warn};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: DispatchSettings) -> Result<Self, DispatchError> {
        Ok(Self::with_engine(EngineHandle::new(settings)?))
    }

    pub fn with_engine(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Dispatch { id, content } => {
                    missive_info!("Dispatch id={} content_len={}", id, content.len());
                    self.engine.dispatch(id, content);
                }
            }
        }
    }

    /// Collects every completion that has arrived so far.
    pub fn drain(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(map_event)
            .collect()
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Completed { id, result } => {
            let outcome = match result {
                Ok(reply) => {
                    missive_info!("Message id={} answered status={}", id, reply.status);
                    DispatchOutcome::from_reply(reply.status, reply.message)
                }
                Err(err) => {
                    missive_warn!("Message id={} failed: {}", id, err);
                    DispatchOutcome::TransportFailure
                }
            };
            Msg::DispatchResolved { id, outcome }
        }
    }
}
