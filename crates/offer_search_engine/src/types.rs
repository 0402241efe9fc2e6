use std::fmt;

use offer_search_core::{Offer, OfferId, SearchGeneration, VisibilityAction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PageFetched {
        generation: SearchGeneration,
        offset: u64,
        result: Result<Vec<Offer>, FetchError>,
    },
    VisibilityChanged {
        offer_id: OfferId,
        action: VisibilityAction,
        result: Result<(), VisibilityError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Failed hide/enable/disable call, with the first error the backend reported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {}", .backend_message.as_deref().unwrap_or("no details"))]
pub struct VisibilityError {
    pub kind: FailureKind,
    pub backend_message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    BadResponse(u16),
    NetworkFailure,
    Unexpected,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::BadResponse(code) => write!(f, "http status {code}"),
            FailureKind::NetworkFailure => write!(f, "network error"),
            FailureKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}
