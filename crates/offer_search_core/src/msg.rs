#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User submitted a search; replaces the current criteria wholesale.
    SearchSubmitted(crate::FilterSet),
    /// The last rendered offer became visible.
    LoadMoreRequested,
    /// Engine completion for a page request.
    PageLoaded {
        generation: crate::SearchGeneration,
        offset: u64,
        result: Result<Vec<crate::Offer>, crate::FetchFailure>,
    },
    /// User asked to hide, enable or disable an offer.
    VisibilityRequested {
        offer_id: crate::OfferId,
        action: crate::VisibilityAction,
    },
    /// Engine completion for a visibility change; the error is the backend's message.
    VisibilityChanged {
        offer_id: crate::OfferId,
        action: crate::VisibilityAction,
        result: Result<(), String>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
