//! Offer search engine: HTTP access to the offers API and effect execution.
mod decode;
mod engine;
mod fetch;
mod query;
mod types;
mod visibility;

pub use decode::{decode_offers, first_error_message, DecodeError};
pub use engine::{ChannelEventSink, EngineError, EngineHandle, EventSink};
pub use fetch::{build_client, FetchSettings, OfferFetcher, ReqwestOfferFetcher};
pub use query::encode_query;
pub use types::{EngineEvent, FailureKind, FetchError, VisibilityError};
pub use visibility::{ReqwestVisibilityService, VisibilityService};
