use chrono::{DateTime, Utc};

use crate::{FetchState, FilterSet, JobType, OfferId, OfferVisibility, SearchGeneration};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchViewModel {
    pub generation: SearchGeneration,
    pub filters: FilterSet,
    pub offers: Vec<OfferRowView>,
    pub offer_count: usize,
    pub has_more: bool,
    pub loading: bool,
    pub fetch_state: FetchState,
    pub dirty: bool,
}

impl SearchViewModel {
    /// Id of the last rendered offer, the anchor for infinite scroll.
    pub fn last_offer_id(&self) -> Option<&OfferId> {
        self.offers.last().map(|row| &row.id)
    }

    /// True once a page failed; only a new search resumes pagination.
    pub fn pagination_halted(&self) -> bool {
        matches!(self.fetch_state, FetchState::Error(_))
    }

    pub fn can_load_more(&self) -> bool {
        self.has_more && !self.loading && !self.pagination_halted()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferRowView {
    pub id: OfferId,
    pub title: String,
    pub company_name: Option<String>,
    pub location: String,
    pub job_type: Option<JobType>,
    pub publish_end_date: DateTime<Utc>,
    pub visibility: OfferVisibility,
    pub visibility_pending: bool,
}
