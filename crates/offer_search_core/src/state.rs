use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::view_model::{OfferRowView, SearchViewModel};
use crate::{
    FilterSet, Notification, Offer, OfferId, OfferVisibility, OffsetTracker, ResultList,
    VisibilityAction,
};

/// Notification posted when a page request fails.
pub const FETCH_ERROR_MESSAGE: &str = "An error occurred while fetching new offers";
pub const FETCH_ERROR_KEY: &str = "fetch-new-offers";
pub const VISIBILITY_FALLBACK_ERROR: &str = "Unexpected Error. Please try again later.";

/// Identifies one search lifetime. Bumped on every submitted search so that
/// late page completions from an older search can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SearchGeneration(u64);

impl SearchGeneration {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SearchGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    /// Server answered with a non-success status.
    BadResponse(u16),
    /// No response at all.
    NetworkFailure,
    /// Anything else, e.g. a body that is not a list of offers.
    Unexpected,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::BadResponse(status) => write!(f, "bad response (status {status})"),
            FetchFailure::NetworkFailure => write!(f, "network failure"),
            FetchFailure::Unexpected => write!(f, "unexpected error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Success,
    Error(FetchFailure),
}

/// Outcome of applying a page completion to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageApplied {
    /// Completion belongs to an older search or to no pending request.
    Discarded,
    Merged,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    filters: FilterSet,
    generation: SearchGeneration,
    tracker: OffsetTracker,
    results: ResultList,
    fetch_state: FetchState,
    pending_offset: Option<u64>,
    visibility_overrides: BTreeMap<OfferId, OfferVisibility>,
    pending_visibility: BTreeSet<OfferId>,
    notification_seq: u64,
    dirty: bool,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> SearchViewModel {
        SearchViewModel {
            generation: self.generation,
            filters: self.filters.clone(),
            offers: self
                .results
                .offers()
                .iter()
                .map(|offer| self.row_view(offer))
                .collect(),
            offer_count: self.results.len(),
            has_more: self.results.has_more(),
            loading: self.is_loading(),
            fetch_state: self.fetch_state,
            dirty: self.dirty,
        }
    }

    fn row_view(&self, offer: &Offer) -> OfferRowView {
        OfferRowView {
            id: offer.id.clone(),
            title: offer.title.clone(),
            company_name: offer.company.name.clone(),
            location: offer.location.clone(),
            job_type: offer.job_type,
            publish_end_date: offer.publish_end_date,
            visibility: self.visibility_of(offer),
            visibility_pending: self.pending_visibility.contains(&offer.id),
        }
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn generation(&self) -> SearchGeneration {
        self.generation
    }

    pub fn fetch_state(&self) -> FetchState {
        self.fetch_state
    }

    pub fn results(&self) -> &ResultList {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.fetch_state == FetchState::Loading
    }

    /// Offsets requested since the current search started, ascending.
    pub fn dispatched_offsets(&self) -> Vec<u64> {
        self.tracker.dispatched().collect()
    }

    /// Visibility after local changes, or `None` for offers not in the list.
    pub fn effective_visibility(&self, offer_id: &OfferId) -> Option<OfferVisibility> {
        self.results
            .get(offer_id)
            .map(|offer| self.visibility_of(offer))
    }

    fn visibility_of(&self, offer: &Offer) -> OfferVisibility {
        self.visibility_overrides
            .get(&offer.id)
            .copied()
            .unwrap_or(offer.visibility)
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Starts a new search lifetime and returns the first page request.
    pub(crate) fn begin_search(&mut self, filters: FilterSet) -> FilterSet {
        self.generation = self.generation.next();
        self.filters = filters.at_offset(0);
        self.tracker.reset();
        self.results.reset();
        self.visibility_overrides.clear();
        let offset = self.tracker.next(0).unwrap_or_default();
        self.pending_offset = Some(offset);
        self.fetch_state = FetchState::Loading;
        self.mark_dirty();
        self.filters.at_offset(offset)
    }

    /// Next page request, or `None` while pagination must not advance.
    pub(crate) fn next_page(&mut self) -> Option<FilterSet> {
        let can_advance = match self.fetch_state {
            FetchState::Success => self.results.has_more(),
            FetchState::Idle | FetchState::Loading | FetchState::Error(_) => false,
        };
        if !can_advance {
            return None;
        }
        let offset = self.tracker.next(self.results.len())?;
        self.pending_offset = Some(offset);
        self.fetch_state = FetchState::Loading;
        self.mark_dirty();
        Some(self.filters.at_offset(offset))
    }

    pub(crate) fn apply_page(
        &mut self,
        generation: SearchGeneration,
        offset: u64,
        result: Result<Vec<Offer>, crate::FetchFailure>,
    ) -> PageApplied {
        if generation != self.generation || self.pending_offset != Some(offset) {
            return PageApplied::Discarded;
        }
        self.pending_offset = None;
        self.mark_dirty();
        match result {
            Ok(page) => {
                self.results.append_page(page);
                self.fetch_state = FetchState::Success;
                PageApplied::Merged
            }
            Err(failure) => {
                self.fetch_state = FetchState::Error(failure);
                PageApplied::Failed
            }
        }
    }

    /// Marks a visibility change as pending if the offer accepts it.
    pub(crate) fn begin_visibility_change(
        &mut self,
        offer_id: &OfferId,
        action: &VisibilityAction,
    ) -> bool {
        if self.pending_visibility.contains(offer_id) {
            return false;
        }
        let Some(current) = self.effective_visibility(offer_id) else {
            return false;
        };
        if !action.is_allowed_from(current) {
            return false;
        }
        self.pending_visibility.insert(offer_id.clone());
        self.mark_dirty();
        true
    }

    /// Records a finished visibility change and returns the notification to post.
    pub(crate) fn finish_visibility_change(
        &mut self,
        offer_id: &OfferId,
        action: &VisibilityAction,
        result: Result<(), String>,
    ) -> Option<Notification> {
        if !self.pending_visibility.remove(offer_id) {
            return None;
        }
        self.mark_dirty();
        self.notification_seq += 1;
        let seq = self.notification_seq;
        match result {
            Ok(()) => {
                if self.results.contains(offer_id) {
                    self.visibility_overrides
                        .insert(offer_id.clone(), action.resulting_visibility());
                }
                Some(Notification::new(
                    action.success_message(),
                    format!("{seq}-{offer_id}-{}", action.key_suffix()),
                ))
            }
            Err(message) => {
                let message = if message.trim().is_empty() {
                    VISIBILITY_FALLBACK_ERROR.to_string()
                } else {
                    message
                };
                Some(Notification::new(
                    message,
                    format!("{seq}-{offer_id}-visibility-error"),
                ))
            }
        }
    }
}
