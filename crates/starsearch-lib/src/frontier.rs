//! Open set for A* search, ordered by estimated total cost.
//!
//! Entries are kept in a sorted `Vec` rather than a heap: the audit trail
//! needs the full ordered contents at each step, and ties must resolve in
//! insertion order.

use serde::Serialize;

use crate::graph::{CityId, Cost};

/// One frontier entry: a city, its estimated total cost, and the city it was
/// reached from when the entry was inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrontierEntry {
    pub city: CityId,
    pub estimate: Cost,
    pub predecessor: CityId,
}

/// Ordered open set with at most one live entry per city.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    entries: Vec<FrontierEntry>,
    processed: Option<CityId>,
}

impl Frontier {
    /// Create an empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry for `city`, replacing any existing one.
    ///
    /// The new entry lands after every entry whose estimate is less than or
    /// equal to its own, so equal estimates leave in insertion order.
    /// `predecessor` also becomes the processed-city tag.
    pub fn upsert(&mut self, city: CityId, estimate: Cost, predecessor: CityId) {
        self.entries.retain(|entry| entry.city != city);
        let position = self
            .entries
            .partition_point(|entry| entry.estimate <= estimate);
        self.entries.insert(
            position,
            FrontierEntry {
                city,
                estimate,
                predecessor,
            },
        );
        self.processed = Some(predecessor);
    }

    /// Remove and return the lowest-estimate entry.
    pub fn extract_min(&mut self) -> Option<FrontierEntry> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0))
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in extraction order.
    pub fn entries(&self) -> &[FrontierEntry] {
        &self.entries
    }

    /// City that triggered the most recent upsert.
    pub fn processed(&self) -> Option<CityId> {
        self.processed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.processed = None;
    }

    /// Capture the current contents as an independent value.
    ///
    /// Returns `None` before the first upsert, since a snapshot is always
    /// attributed to the city whose expansion produced it.
    pub fn snapshot(&self) -> Option<FrontierSnapshot> {
        self.processed.map(|processed| FrontierSnapshot {
            processed,
            entries: self.entries.clone(),
        })
    }
}

/// Frozen copy of a [`Frontier`] taken for the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrontierSnapshot {
    pub processed: CityId,
    pub entries: Vec<FrontierEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cities(frontier: &Frontier) -> Vec<CityId> {
        frontier.entries().iter().map(|entry| entry.city).collect()
    }

    #[test]
    fn entries_stay_sorted_by_estimate() {
        let mut frontier = Frontier::new();
        frontier.upsert(1, 30, 0);
        frontier.upsert(2, 10, 0);
        frontier.upsert(3, 20, 0);

        assert_eq!(cities(&frontier), vec![2, 3, 1]);
        assert_eq!(frontier.extract_min().map(|e| e.city), Some(2));
        assert_eq!(frontier.extract_min().map(|e| e.city), Some(3));
        assert_eq!(frontier.extract_min().map(|e| e.city), Some(1));
        assert!(frontier.extract_min().is_none());
    }

    #[test]
    fn ties_leave_in_insertion_order() {
        let mut frontier = Frontier::new();
        frontier.upsert(4, 10, 0);
        frontier.upsert(2, 10, 0);
        frontier.upsert(3, 5, 0);
        frontier.upsert(1, 10, 0);

        assert_eq!(cities(&frontier), vec![3, 4, 2, 1]);
    }

    #[test]
    fn upsert_replaces_and_requeues_existing_city() {
        let mut frontier = Frontier::new();
        frontier.upsert(1, 10, 0);
        frontier.upsert(2, 10, 0);
        frontier.upsert(1, 10, 3);

        assert_eq!(frontier.len(), 2);
        assert_eq!(cities(&frontier), vec![2, 1]);
        assert_eq!(frontier.entries()[1].predecessor, 3);

        frontier.upsert(2, 4, 5);
        assert_eq!(cities(&frontier), vec![2, 1]);
        assert_eq!(frontier.entries()[0].estimate, 4);
    }

    #[test]
    fn processed_tracks_latest_predecessor() {
        let mut frontier = Frontier::new();
        assert_eq!(frontier.processed(), None);
        assert!(frontier.snapshot().is_none());

        frontier.upsert(0, 7, 0);
        frontier.upsert(2, 9, 0);
        frontier.upsert(3, 8, 2);
        assert_eq!(frontier.processed(), Some(2));

        frontier.clear();
        assert!(frontier.is_empty());
        assert_eq!(frontier.processed(), None);
    }

    #[test]
    fn snapshot_is_independent_of_later_mutation() {
        let mut frontier = Frontier::new();
        frontier.upsert(1, 5, 0);
        frontier.upsert(2, 6, 0);
        let snapshot = frontier.snapshot().expect("frontier has been updated");

        frontier.upsert(1, 2, 3);
        frontier.extract_min();
        frontier.upsert(9, 1, 4);

        assert_eq!(snapshot.processed, 0);
        assert_eq!(
            snapshot.entries,
            vec![
                FrontierEntry {
                    city: 1,
                    estimate: 5,
                    predecessor: 0
                },
                FrontierEntry {
                    city: 2,
                    estimate: 6,
                    predecessor: 0
                },
            ]
        );
    }
}
