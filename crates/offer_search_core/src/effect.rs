use crate::{FilterSet, OfferId, SearchGeneration, VisibilityAction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch one page; `filters.offset()` is the page offset.
    FetchPage {
        generation: SearchGeneration,
        filters: FilterSet,
    },
    ChangeVisibility {
        offer_id: OfferId,
        action: VisibilityAction,
    },
    Notify(Notification),
}

/// User-facing message for the notification sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub key: String,
}

impl Notification {
    pub fn new(message: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            key: key.into(),
        }
    }
}
