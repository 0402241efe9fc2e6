use crate::{Msg, OfferId, SearchViewModel};

/// Platform capability that reports when an anchor item scrolls into view.
///
/// Implementations only need to watch a single anchor at a time.
pub trait IntersectionWatcher {
    fn observe(&mut self, anchor: &OfferId);
    fn disconnect(&mut self);
}

/// Turns "last offer became visible" into page requests.
#[derive(Debug)]
pub struct ScrollTrigger<W> {
    watcher: W,
    anchor: Option<OfferId>,
}

impl<W: IntersectionWatcher> ScrollTrigger<W> {
    pub fn new(watcher: W) -> Self {
        Self {
            watcher,
            anchor: None,
        }
    }

    pub fn anchor(&self) -> Option<&OfferId> {
        self.anchor.as_ref()
    }

    pub fn watcher(&self) -> &W {
        &self.watcher
    }

    /// Moves the observation to the current last offer.
    ///
    /// Observation stops entirely while the list is empty or after a failed page.
    pub fn sync_anchor(&mut self, view: &SearchViewModel) {
        let target = if view.pagination_halted() {
            None
        } else {
            view.last_offer_id().cloned()
        };
        if target == self.anchor {
            return;
        }
        if self.anchor.is_some() {
            self.watcher.disconnect();
        }
        if let Some(anchor) = &target {
            self.watcher.observe(anchor);
        }
        self.anchor = target;
    }

    /// Visibility callback from the watcher.
    pub fn on_intersection(
        &self,
        anchor: &OfferId,
        is_visible: bool,
        view: &SearchViewModel,
    ) -> Option<Msg> {
        let observed = self.anchor.as_ref() == Some(anchor);
        (observed && is_visible && view.can_load_more()).then_some(Msg::LoadMoreRequested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_model::OfferRowView;
    use crate::{FetchFailure, FetchState, OfferVisibility};

    #[derive(Debug, Default)]
    struct RecordingWatcher {
        calls: Vec<String>,
    }

    impl IntersectionWatcher for RecordingWatcher {
        fn observe(&mut self, anchor: &OfferId) {
            self.calls.push(format!("observe {anchor}"));
        }

        fn disconnect(&mut self) {
            self.calls.push("disconnect".to_string());
        }
    }

    fn view_with(ids: &[&str]) -> SearchViewModel {
        SearchViewModel {
            offers: ids
                .iter()
                .map(|id| OfferRowView {
                    id: OfferId::new(*id),
                    title: String::new(),
                    company_name: None,
                    location: String::new(),
                    job_type: None,
                    publish_end_date: Default::default(),
                    visibility: OfferVisibility::Visible,
                    visibility_pending: false,
                })
                .collect(),
            offer_count: ids.len(),
            has_more: true,
            fetch_state: FetchState::Success,
            ..SearchViewModel::default()
        }
    }

    #[test]
    fn reattaches_when_last_item_changes() {
        let mut trigger = ScrollTrigger::new(RecordingWatcher::default());

        trigger.sync_anchor(&view_with(&[]));
        trigger.sync_anchor(&view_with(&["a", "b"]));
        trigger.sync_anchor(&view_with(&["a", "b"]));
        trigger.sync_anchor(&view_with(&["a", "b", "c"]));

        assert_eq!(
            trigger.watcher().calls,
            vec!["observe b", "disconnect", "observe c"]
        );
        assert_eq!(trigger.anchor(), Some(&OfferId::new("c")));
    }

    #[test]
    fn stops_observing_after_failure() {
        let mut trigger = ScrollTrigger::new(RecordingWatcher::default());
        let mut view = view_with(&["a"]);
        trigger.sync_anchor(&view);

        view.fetch_state = FetchState::Error(FetchFailure::NetworkFailure);
        trigger.sync_anchor(&view);

        assert_eq!(trigger.watcher().calls, vec!["observe a", "disconnect"]);
        assert_eq!(trigger.anchor(), None);
        assert_eq!(trigger.on_intersection(&OfferId::new("a"), true, &view), None);
    }

    #[test]
    fn requests_more_only_when_allowed() {
        let mut trigger = ScrollTrigger::new(RecordingWatcher::default());
        let mut view = view_with(&["a", "b"]);
        trigger.sync_anchor(&view);
        let anchor = OfferId::new("b");

        assert_eq!(
            trigger.on_intersection(&anchor, true, &view),
            Some(Msg::LoadMoreRequested)
        );
        assert_eq!(trigger.on_intersection(&anchor, false, &view), None);
        assert_eq!(trigger.on_intersection(&OfferId::new("a"), true, &view), None);

        view.loading = true;
        assert_eq!(trigger.on_intersection(&anchor, true, &view), None);

        view.loading = false;
        view.has_more = false;
        assert_eq!(trigger.on_intersection(&anchor, true, &view), None);
    }
}
