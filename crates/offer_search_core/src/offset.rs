use std::collections::BTreeSet;

/// Remembers which page offsets were already requested for the current search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OffsetTracker {
    dispatched: BTreeSet<u64>,
}

impl OffsetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset of the page following `current_size` results, recorded as dispatched.
    ///
    /// Returns `None` when that offset was already handed out since the last reset.
    pub fn next(&mut self, current_size: usize) -> Option<u64> {
        let offset = current_size as u64;
        self.dispatched.insert(offset).then_some(offset)
    }

    pub fn reset(&mut self) {
        self.dispatched.clear();
    }

    pub fn is_dispatched(&self, offset: u64) -> bool {
        self.dispatched.contains(&offset)
    }

    pub fn dispatched(&self) -> impl Iterator<Item = u64> + '_ {
        self.dispatched.iter().copied()
    }
}
