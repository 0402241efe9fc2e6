use std::sync::{mpsc, Arc};
use std::thread;

use offer_search_core::{FilterSet, OfferId, SearchGeneration, VisibilityAction};
use search_logging::search_debug;

use crate::fetch::build_client;
use crate::{
    EngineEvent, FetchError, FetchSettings, OfferFetcher, ReqwestOfferFetcher,
    ReqwestVisibilityService, VisibilityService,
};

/// Receives engine completions; called from the engine's runtime threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] FetchError),
}

enum EngineCommand {
    FetchPage {
        generation: SearchGeneration,
        filters: FilterSet,
    },
    ChangeVisibility {
        offer_id: OfferId,
        action: VisibilityAction,
    },
}

/// Runs requests on a background tokio runtime and reports through an [`EventSink`].
///
/// Requests are never cancelled; dropping the handle stops accepting new ones.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let client = build_client(&settings)?;
        let fetcher = Arc::new(ReqwestOfferFetcher::with_client(
            settings.clone(),
            client.clone(),
        ));
        let visibility = Arc::new(ReqwestVisibilityService::with_client(settings, client));
        Self::with_services(fetcher, visibility, sink)
    }

    pub fn with_services(
        fetcher: Arc<dyn OfferFetcher>,
        visibility: Arc<dyn VisibilityService>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let fetcher = fetcher.clone();
                let visibility = visibility.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    handle_command(fetcher.as_ref(), visibility.as_ref(), command, sink.as_ref())
                        .await;
                });
            }
            search_debug!("engine command channel closed");
        });

        Ok(Self { cmd_tx })
    }

    pub fn fetch_page(&self, generation: SearchGeneration, filters: FilterSet) {
        let _ = self.cmd_tx.send(EngineCommand::FetchPage {
            generation,
            filters,
        });
    }

    pub fn change_visibility(&self, offer_id: OfferId, action: VisibilityAction) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::ChangeVisibility { offer_id, action });
    }
}

async fn handle_command(
    fetcher: &dyn OfferFetcher,
    visibility: &dyn VisibilityService,
    command: EngineCommand,
    sink: &dyn EventSink,
) {
    match command {
        EngineCommand::FetchPage {
            generation,
            filters,
        } => {
            let offset = filters.offset();
            let result = fetcher.fetch(&filters, offset).await;
            sink.emit(EngineEvent::PageFetched {
                generation,
                offset,
                result,
            });
        }
        EngineCommand::ChangeVisibility { offer_id, action } => {
            let result = visibility.apply(&offer_id, &action).await;
            sink.emit(EngineEvent::VisibilityChanged {
                offer_id,
                action,
                result,
            });
        }
    }
}
