use std::collections::HashSet;

use crate::{Offer, OfferId};

/// Appends every offer of `incoming` whose id is not yet known, keeping first-seen order.
///
/// Duplicates inside `incoming` itself are dropped as well.
pub fn merge(existing: Vec<Offer>, incoming: Vec<Offer>) -> Vec<Offer> {
    let mut list = ResultList::from_offers(existing);
    list.append_page(incoming);
    list.offers
}

/// Ordered, id-unique offers of the current search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultList {
    offers: Vec<Offer>,
    ids: HashSet<OfferId>,
    has_more: bool,
}

impl Default for ResultList {
    fn default() -> Self {
        Self {
            offers: Vec::new(),
            ids: HashSet::new(),
            has_more: true,
        }
    }
}

impl ResultList {
    pub fn new() -> Self {
        Self::default()
    }

    fn from_offers(offers: Vec<Offer>) -> Self {
        let mut list = Self::new();
        for offer in offers {
            list.push_unique(offer);
        }
        list
    }

    /// Merges one fetched page and returns how many offers were new.
    ///
    /// An empty page marks the results as exhausted. The backend gives no
    /// stronger signal, so a non-final empty page would also stop pagination.
    pub fn append_page(&mut self, page: Vec<Offer>) -> usize {
        self.has_more = !page.is_empty();
        let mut added = 0;
        for offer in page {
            if self.push_unique(offer) {
                added += 1;
            }
        }
        added
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn contains(&self, id: &OfferId) -> bool {
        self.ids.contains(id)
    }

    pub fn get(&self, id: &OfferId) -> Option<&Offer> {
        self.offers.iter().find(|offer| &offer.id == id)
    }

    pub fn last_id(&self) -> Option<&OfferId> {
        self.offers.last().map(|offer| &offer.id)
    }

    fn push_unique(&mut self, offer: Offer) -> bool {
        if !self.ids.insert(offer.id.clone()) {
            return false;
        }
        self.offers.push(offer);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(offers: &[Offer]) -> Vec<&str> {
        offers.iter().map(|offer| offer.id.as_str()).collect()
    }

    #[test]
    fn merge_keeps_first_seen_order_and_drops_duplicates() {
        let existing = vec![Offer::stub("a", "A"), Offer::stub("b", "B")];
        let incoming = vec![
            Offer::stub("b", "B again"),
            Offer::stub("c", "C"),
            Offer::stub("c", "C again"),
            Offer::stub("d", "D"),
        ];

        let merged = merge(existing, incoming);

        assert_eq!(ids(&merged), vec!["a", "b", "c", "d"]);
        assert_eq!(merged[1].title, "B");
        assert_eq!(merged[2].title, "C");
    }

    #[test]
    fn has_more_follows_raw_page_length() {
        let mut list = ResultList::new();
        assert!(list.has_more());

        let added = list.append_page(vec![Offer::stub("a", "A")]);
        assert_eq!(added, 1);
        assert!(list.has_more());

        // A page made only of known offers still counts as "more may follow".
        let added = list.append_page(vec![Offer::stub("a", "A")]);
        assert_eq!(added, 0);
        assert!(list.has_more());

        let added = list.append_page(Vec::new());
        assert_eq!(added, 0);
        assert!(!list.has_more());
        assert_eq!(list.last_id(), Some(&OfferId::new("a")));
    }

    #[test]
    fn reset_clears_offers_and_restores_has_more() {
        let mut list = ResultList::new();
        list.append_page(vec![Offer::stub("a", "A")]);
        list.append_page(Vec::new());

        list.reset();

        assert!(list.is_empty());
        assert!(list.has_more());
        assert!(!list.contains(&OfferId::new("a")));
    }
}
