//! A* search engine with a full frontier audit trail.
//!
//! The loop ends as soon as the goal is *discovered* as a neighbour of the
//! city being expanded, not when the goal is popped as the cheapest frontier
//! entry. Reported routes can therefore cost more than the optimum when a
//! cheaper route is only completed by a later expansion.

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::error::{Error, Result};
use crate::frontier::{Frontier, FrontierSnapshot};
use crate::graph::{CityId, Graph};
use crate::tracker::PathTracker;

/// How a finished search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    /// The goal was discovered and a path can be reconstructed.
    GoalReached,
    /// Every reachable city was expanded without discovering the goal.
    FrontierExhausted,
}

/// Lifecycle of a [`SearchEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Ready,
    Running,
    Done(SearchOutcome),
}

/// Runs searches over a distance graph guided by a heuristic graph.
///
/// The engine borrows both graphs and owns the per-search frontier, tracker
/// and trace. Each call to [`SearchEngine::search`] starts from scratch.
#[derive(Debug)]
pub struct SearchEngine<'g> {
    distances: &'g Graph,
    heuristics: &'g Graph,
    state: SearchState,
    source: Option<CityId>,
    goal: Option<CityId>,
    frontier: Frontier,
    tracker: PathTracker,
    trace: Vec<FrontierSnapshot>,
    relaxations: usize,
    max_frontier_len: usize,
}

impl<'g> SearchEngine<'g> {
    /// Pair a distance graph with a heuristic graph over the same cities.
    pub fn new(distances: &'g Graph, heuristics: &'g Graph) -> Result<Self> {
        if distances.len() != heuristics.len() {
            return Err(Error::GraphMismatch {
                distances: distances.len(),
                heuristics: heuristics.len(),
            });
        }
        if let Some(((index, expected), (_, found))) = distances
            .cities()
            .zip(heuristics.cities())
            .find(|((_, a), (_, b))| a != b)
        {
            return Err(Error::TitleMismatch {
                index,
                distances: expected.code.clone(),
                heuristics: found.code.clone(),
            });
        }

        Ok(Self {
            distances,
            heuristics,
            state: SearchState::Ready,
            source: None,
            goal: None,
            frontier: Frontier::new(),
            tracker: PathTracker::new(),
            trace: Vec::new(),
            relaxations: 0,
            max_frontier_len: 0,
        })
    }

    /// Resolve both city names and search between them.
    ///
    /// Fails before touching any search state when a name is unknown.
    pub fn search(&mut self, source: &str, goal: &str) -> Result<SearchOutcome> {
        let source = self.distances.resolve(source)?;
        let goal = self.distances.resolve(goal)?;
        Ok(self.search_indices(source, goal))
    }

    /// Search between two city indices.
    ///
    /// # Panics
    ///
    /// Panics if either index is outside the graph.
    pub fn search_indices(&mut self, source: CityId, goal: CityId) -> SearchOutcome {
        assert!(
            source < self.distances.len() && goal < self.distances.len(),
            "search endpoints ({source}, {goal}) outside graph of {}",
            self.distances.len()
        );

        self.state = SearchState::Running;
        self.source = Some(source);
        self.goal = Some(goal);
        self.frontier.clear();
        self.trace.clear();
        self.relaxations = 0;

        self.tracker.reset(self.heuristics, source, goal);
        self.frontier
            .upsert(source, self.tracker.heuristic(source), source);
        self.max_frontier_len = self.frontier.len();

        debug!(
            source = self.code(source),
            goal = self.code(goal),
            "starting search"
        );

        let outcome = if source == goal {
            SearchOutcome::GoalReached
        } else {
            self.run(goal)
        };

        self.state = SearchState::Done(outcome);
        info!(
            source = self.code(source),
            goal = self.code(goal),
            ?outcome,
            relaxations = self.relaxations,
            "search finished"
        );
        outcome
    }

    fn run(&mut self, goal: CityId) -> SearchOutcome {
        while let Some(entry) = self.frontier.extract_min() {
            if self.expand(entry.city, goal) {
                return SearchOutcome::GoalReached;
            }
        }
        SearchOutcome::FrontierExhausted
    }

    /// Relax every neighbour of `parent`; returns `true` once `goal` is seen.
    fn expand(&mut self, parent: CityId, goal: CityId) -> bool {
        let parent_cost = self
            .tracker
            .accumulated(parent)
            .unwrap_or_default();
        debug!(
            city = self.code(parent),
            accumulated = parent_cost,
            "expanding"
        );

        for neighbour in self.distances.neighbours(parent) {
            // Costs saturate at `Cost::MAX` so an oversized cell can only lose.
            let accumulated =
                parent_cost.saturating_add(self.distances.distance(parent, neighbour));
            let estimate = accumulated.saturating_add(self.tracker.heuristic(neighbour));

            if self
                .tracker
                .try_relax(neighbour, estimate, parent, accumulated)
            {
                self.frontier.upsert(neighbour, estimate, parent);
                if let Some(snapshot) = self.frontier.snapshot() {
                    self.trace.push(snapshot);
                }
                self.relaxations += 1;
                trace!(
                    city = self.code(neighbour),
                    via = self.code(parent),
                    estimate,
                    accumulated,
                    "relaxed"
                );
            }
            self.max_frontier_len = self.max_frontier_len.max(self.frontier.len());

            if neighbour == goal {
                return true;
            }
        }
        false
    }

    fn code(&self, city: CityId) -> &str {
        self.distances.city_code(city).unwrap_or("<unknown>")
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Outcome of the most recent search, once it has finished.
    pub fn outcome(&self) -> Option<SearchOutcome> {
        match self.state {
            SearchState::Done(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn source(&self) -> Option<CityId> {
        self.source
    }

    pub fn goal(&self) -> Option<CityId> {
        self.goal
    }

    /// Route from source to goal, when the last search reached the goal.
    pub fn path(&self) -> Option<Vec<CityId>> {
        if self.outcome() != Some(SearchOutcome::GoalReached) {
            return None;
        }
        self.tracker.reconstruct_path(self.source?, self.goal?)
    }

    /// Frontier snapshots, one per successful relaxation.
    pub fn trace(&self) -> &[FrontierSnapshot] {
        &self.trace
    }

    /// Number of successful relaxations in the last search.
    pub fn relaxation_count(&self) -> usize {
        self.relaxations
    }

    /// Largest frontier observed during the last search.
    pub fn max_frontier_len(&self) -> usize {
        self.max_frontier_len
    }

    pub fn tracker(&self) -> &PathTracker {
        &self.tracker
    }

    pub fn distances(&self) -> &'g Graph {
        self.distances
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::CityTitle;

    fn titles() -> Vec<CityTitle> {
        ["A", "B", "C", "D"]
            .iter()
            .map(|code| CityTitle::new(*code, *code))
            .collect()
    }

    fn heuristics() -> Graph {
        Graph::from_edges(titles(), &[(0, 3, 3), (1, 3, 2), (2, 3, 1)])
    }

    #[test]
    fn new_rejects_mismatched_graphs() {
        let distances = Graph::from_edges(titles(), &[]);
        let heuristics = Graph::from_edges(vec![CityTitle::new("A", "A")], &[]);
        let error = SearchEngine::new(&distances, &heuristics).expect_err("mismatch");
        assert!(matches!(
            error,
            Error::GraphMismatch {
                distances: 4,
                heuristics: 1
            }
        ));
    }

    #[test]
    fn state_moves_from_ready_to_done() {
        let distances = Graph::from_edges(titles(), &[(0, 1, 1), (1, 2, 1), (2, 3, 1)]);
        let heuristics = heuristics();
        let mut engine = SearchEngine::new(&distances, &heuristics).expect("same size");

        assert_eq!(engine.state(), SearchState::Ready);
        assert_eq!(engine.outcome(), None);
        assert_eq!(engine.path(), None);

        let outcome = engine.search("A", "D").expect("known cities");
        assert_eq!(outcome, SearchOutcome::GoalReached);
        assert_eq!(engine.state(), SearchState::Done(SearchOutcome::GoalReached));
    }

    #[test]
    fn unknown_city_leaves_engine_untouched() {
        let distances = Graph::from_edges(titles(), &[(0, 1, 1)]);
        let heuristics = heuristics();
        let mut engine = SearchEngine::new(&distances, &heuristics).expect("same size");
        engine.search("A", "B").expect("known cities");
        let trace_before = engine.trace().to_vec();

        let error = engine.search("A", "Z").expect_err("unknown goal");
        assert!(matches!(error, Error::UnknownCity { .. }));
        assert_eq!(engine.goal(), Some(1));
        assert_eq!(engine.trace(), trace_before.as_slice());
        assert_eq!(engine.path(), Some(vec![0, 1]));
    }

    #[test]
    fn max_frontier_len_tracks_widest_step() {
        let distances = Graph::from_edges(titles(), &[(0, 1, 1), (0, 2, 1), (0, 3, 9)]);
        let heuristics = Graph::from_edges(titles(), &[]);
        let mut engine = SearchEngine::new(&distances, &heuristics).expect("same size");
        engine.search_indices(0, 3);
        assert_eq!(engine.max_frontier_len(), 3);
        assert_eq!(engine.relaxation_count(), 3);
    }

    #[test]
    fn new_rejects_graphs_with_cities_in_a_different_order() {
        let distances = Graph::from_edges(titles(), &[]);
        let mut swapped = titles();
        swapped.swap(1, 2);
        let heuristics = Graph::from_edges(swapped, &[]);

        let error = SearchEngine::new(&distances, &heuristics).expect_err("order differs");
        match error {
            Error::TitleMismatch {
                index,
                distances,
                heuristics,
            } => {
                assert_eq!(index, 1);
                assert_eq!(distances, "B");
                assert_eq!(heuristics, "C");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn oversized_heuristic_cell_saturates_instead_of_overflowing() {
        let distances = crate::matrix::parse_matrix("City A B C\nA 0 1 -\nB - 0 1\nC - - 0\n")
            .expect("distances parse");
        let heuristics = crate::matrix::parse_matrix(
            "City A B C\nA 0 1 2\nB - 0 18446744073709551615\nC - - 0\n",
        )
        .expect("heuristics parse");
        let mut engine = SearchEngine::new(&distances, &heuristics).expect("same cities");

        let outcome = engine.search("A", "C").expect("known cities");
        assert_eq!(outcome, SearchOutcome::GoalReached);
        assert_eq!(engine.tracker().estimate(1), Some(u64::MAX));
        assert_eq!(engine.path(), Some(vec![0, 1, 2]));
        assert_eq!(engine.tracker().accumulated(2), Some(2));
    }

    #[test]
    #[should_panic(expected = "outside graph")]
    fn out_of_range_index_panics() {
        let distances = Graph::from_edges(titles(), &[]);
        let heuristics = heuristics();
        let mut engine = SearchEngine::new(&distances, &heuristics).expect("same size");
        engine.search_indices(0, 7);
    }
}
