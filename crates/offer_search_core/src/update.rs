use crate::state::{PageApplied, FETCH_ERROR_KEY, FETCH_ERROR_MESSAGE};
use crate::{Effect, Msg, Notification, SearchState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: SearchState, msg: Msg) -> (SearchState, Vec<Effect>) {
    let effects = match msg {
        Msg::SearchSubmitted(filters) => {
            let filters = state.begin_search(filters);
            vec![Effect::FetchPage {
                generation: state.generation(),
                filters,
            }]
        }
        Msg::LoadMoreRequested => match state.next_page() {
            Some(filters) => vec![Effect::FetchPage {
                generation: state.generation(),
                filters,
            }],
            None => Vec::new(),
        },
        Msg::PageLoaded {
            generation,
            offset,
            result,
        } => match state.apply_page(generation, offset, result) {
            PageApplied::Failed => vec![Effect::Notify(Notification::new(
                FETCH_ERROR_MESSAGE,
                FETCH_ERROR_KEY,
            ))],
            PageApplied::Merged | PageApplied::Discarded => Vec::new(),
        },
        Msg::VisibilityRequested { offer_id, action } => {
            if state.begin_visibility_change(&offer_id, &action) {
                vec![Effect::ChangeVisibility { offer_id, action }]
            } else {
                Vec::new()
            }
        }
        Msg::VisibilityChanged {
            offer_id,
            action,
            result,
        } => state
            .finish_visibility_change(&offer_id, &action, result)
            .map(Effect::Notify)
            .into_iter()
            .collect(),
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
