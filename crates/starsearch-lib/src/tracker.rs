use serde::Serialize;

use crate::graph::{CityId, Cost, Graph};

/// How a reached city was first entered on its best-known path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "city")]
pub enum Predecessor {
    /// The city is the search source.
    Source,
    /// The city was reached from another city.
    City(CityId),
}

/// Best-known path to a city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BestPath {
    /// Accumulated actual cost plus heuristic (f).
    pub estimate: Cost,
    /// Accumulated actual cost from the source (g).
    pub accumulated: Cost,
    pub predecessor: Predecessor,
}

/// Ledger row for a single city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrackerRow {
    /// Heuristic estimate to the goal (h).
    pub heuristic: Cost,
    /// `None` until the city is reached.
    pub best: Option<BestPath>,
}

/// Per-city ledger of best-known costs and predecessors for one search.
#[derive(Debug, Clone, Default)]
pub struct PathTracker {
    rows: Vec<TrackerRow>,
}

impl PathTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reinitialise the ledger for a search from `source` to `goal`.
    ///
    /// Every city gets its heuristic to `goal`; only the source is reached,
    /// with zero accumulated cost.
    pub fn reset(&mut self, heuristics: &Graph, source: CityId, goal: CityId) {
        self.rows.clear();
        self.rows.extend((0..heuristics.len()).map(|city| TrackerRow {
            heuristic: heuristics.distance(city, goal),
            best: None,
        }));

        let row = &mut self.rows[source];
        row.best = Some(BestPath {
            estimate: row.heuristic,
            accumulated: 0,
            predecessor: Predecessor::Source,
        });
    }

    /// Record a candidate path if its estimate strictly improves on the best.
    ///
    /// Returns `true` when the candidate was committed.
    pub fn try_relax(
        &mut self,
        city: CityId,
        estimate: Cost,
        predecessor: CityId,
        accumulated: Cost,
    ) -> bool {
        let row = &mut self.rows[city];
        if row.best.is_some_and(|best| estimate >= best.estimate) {
            return false;
        }
        row.best = Some(BestPath {
            estimate,
            accumulated,
            predecessor: Predecessor::City(predecessor),
        });
        true
    }

    /// Follow predecessors from `goal` back to the source.
    ///
    /// Returns `None` when the goal was never reached.
    pub fn reconstruct_path(&self, source: CityId, goal: CityId) -> Option<Vec<CityId>> {
        let mut path = vec![goal];
        let mut current = goal;
        loop {
            match self.rows.get(current)?.best?.predecessor {
                Predecessor::Source => break,
                Predecessor::City(previous) => {
                    // A path never revisits a city.
                    if path.len() > self.rows.len() {
                        return None;
                    }
                    path.push(previous);
                    current = previous;
                }
            }
        }
        path.reverse();
        debug_assert_eq!(path.first(), Some(&source));
        Some(path)
    }

    pub fn rows(&self) -> &[TrackerRow] {
        &self.rows
    }

    pub fn is_reached(&self, city: CityId) -> bool {
        self.rows[city].best.is_some()
    }

    pub fn heuristic(&self, city: CityId) -> Cost {
        self.rows[city].heuristic
    }

    pub fn estimate(&self, city: CityId) -> Option<Cost> {
        self.rows[city].best.map(|best| best.estimate)
    }

    pub fn accumulated(&self, city: CityId) -> Option<Cost> {
        self.rows[city].best.map(|best| best.accumulated)
    }

    pub fn predecessor(&self, city: CityId) -> Option<Predecessor> {
        self.rows[city].best.map(|best| best.predecessor)
    }
}
