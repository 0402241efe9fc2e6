use std::sync::{mpsc, Arc};

use offer_search_core::{Effect, FetchFailure, Msg, Notification};
use offer_search_engine::{
    EngineError, EngineEvent, EngineHandle, EventSink, FailureKind, FetchSettings,
};
use search_logging::{search_debug, search_info, search_warn};

use super::app::AppEvent;

/// Executes effects returned by `update` against the engine.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        settings: FetchSettings,
        events: mpsc::Sender<AppEvent>,
    ) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(settings, Arc::new(MsgSink { events }))?;
        Ok(Self { engine })
    }

    /// Starts engine work and hands back the notifications to display.
    pub fn run(&self, effects: Vec<Effect>) -> Vec<Notification> {
        let mut notifications = Vec::new();
        for effect in effects {
            match effect {
                Effect::FetchPage {
                    generation,
                    filters,
                } => {
                    search_info!(
                        "FetchPage search={} offset={} limit={}",
                        generation,
                        filters.offset(),
                        filters.limit()
                    );
                    self.engine.fetch_page(generation, filters);
                }
                Effect::ChangeVisibility { offer_id, action } => {
                    search_info!("ChangeVisibility offer={} action={:?}", offer_id, action);
                    self.engine.change_visibility(offer_id, action);
                }
                Effect::Notify(notification) => {
                    search_debug!("Notify key={}", notification.key);
                    notifications.push(notification);
                }
            }
        }
        notifications
    }
}

/// Feeds engine completions back into the app loop as messages.
struct MsgSink {
    events: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.events.send(AppEvent::Engine(engine_event_to_msg(event)));
    }
}

pub fn engine_event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageFetched {
            generation,
            offset,
            result,
        } => Msg::PageLoaded {
            generation,
            offset,
            result: result.map_err(|err| {
                search_warn!("Page at offset {} for search {} failed: {}", offset, generation, err);
                map_failure(err.kind)
            }),
        },
        EngineEvent::VisibilityChanged {
            offer_id,
            action,
            result,
        } => Msg::VisibilityChanged {
            result: result.map_err(|err| {
                search_warn!("Visibility change for {} failed: {}", offer_id, err);
                err.backend_message.unwrap_or_default()
            }),
            offer_id,
            action,
        },
    }
}

fn map_failure(kind: FailureKind) -> FetchFailure {
    match kind {
        FailureKind::BadResponse(status) => FetchFailure::BadResponse(status),
        FailureKind::NetworkFailure => FetchFailure::NetworkFailure,
        FailureKind::Unexpected => FetchFailure::Unexpected,
    }
}
