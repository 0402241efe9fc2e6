//! Offer search core: pure pagination state machine and view-model helpers.
mod aggregate;
mod effect;
mod filter;
mod msg;
mod offer;
mod offset;
mod scroll;
mod state;
mod update;
mod view_model;
mod visibility;

pub use aggregate::{merge, ResultList};
pub use effect::{Effect, Notification};
pub use filter::{
    DurationRange, FilterError, FilterSet, DEFAULT_PAGE_LIMIT, JOB_MAX_DURATION, JOB_MIN_DURATION,
};
pub use msg::Msg;
pub use offer::{CompanyRef, HiddenReason, JobType, JobWindow, Offer, OfferId, OfferVisibility};
pub use offset::OffsetTracker;
pub use scroll::{IntersectionWatcher, ScrollTrigger};
pub use state::{
    FetchFailure, FetchState, SearchGeneration, SearchState, FETCH_ERROR_KEY, FETCH_ERROR_MESSAGE,
    VISIBILITY_FALLBACK_ERROR,
};
pub use update::update;
pub use view_model::{OfferRowView, SearchViewModel};
pub use visibility::VisibilityAction;
