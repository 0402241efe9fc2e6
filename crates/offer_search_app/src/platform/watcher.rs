use offer_search_core::{IntersectionWatcher, OfferId};

/// Intersection watcher for a line-oriented terminal.
///
/// The bottom of the output is the viewport, so the observed anchor counts
/// as visible whenever the user asks to scroll to the end.
#[derive(Debug, Default)]
pub struct TerminalWatcher {
    observed: Option<OfferId>,
}

impl TerminalWatcher {
    pub fn observed(&self) -> Option<&OfferId> {
        self.observed.as_ref()
    }
}

impl IntersectionWatcher for TerminalWatcher {
    fn observe(&mut self, anchor: &OfferId) {
        self.observed = Some(anchor.clone());
    }

    fn disconnect(&mut self) {
        self.observed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use offer_search_core::{update, Msg, Offer, ScrollTrigger, SearchGeneration, SearchState};

    #[test]
    fn follows_the_last_offer() {
        let (state, _) = update(SearchState::new(), Msg::SearchSubmitted(Default::default()));
        let (state, _) = update(
            state,
            Msg::PageLoaded {
                generation: SearchGeneration::new(1),
                offset: 0,
                result: Ok(vec![Offer::stub("a", "A"), Offer::stub("b", "B")]),
            },
        );
        let mut trigger = ScrollTrigger::new(TerminalWatcher::default());

        trigger.sync_anchor(&state.view());
        assert_eq!(trigger.watcher().observed(), Some(&OfferId::new("b")));

        let (state, _) = update(state, Msg::SearchSubmitted(Default::default()));
        trigger.sync_anchor(&state.view());
        assert_eq!(trigger.watcher().observed(), None);
    }
}
