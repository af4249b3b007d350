use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::frontier::FrontierSnapshot;
use crate::graph::{CityId, Cost, Graph};
use crate::search::{SearchEngine, SearchOutcome};
use crate::tracker::Predecessor;

/// Banner printed between the frontier trace and the path table.
pub const PATH_BANNER: &str = "*** Cities gone through, from source to destination ***";

const GROUP_HEADER: &str = " City f() Prev |";
const GROUP_RULE: &str = "---------------|";
const GROUP_BLANK: &str = "               |";

/// City reference resolved against the distance graph's title index.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CityRef {
    pub index: CityId,
    pub code: String,
    pub name: String,
}

impl CityRef {
    fn resolve(graph: &Graph, index: CityId) -> Self {
        Self {
            index,
            code: graph.city_code(index).unwrap_or("<unknown>").to_string(),
            name: graph.city_name(index).unwrap_or("<unknown>").to_string(),
        }
    }
}

/// Step along the reconstructed route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteStep {
    pub city: CityRef,
    /// Code of the following city; `None` on the final step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Distance to the following city; `None` on the final step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg_distance: Option<Cost>,
    /// Distance travelled from the source to this city.
    pub cumulative_distance: Cost,
}

/// One frontier entry of a trace row, with codes resolved.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TraceEntry {
    pub city: String,
    pub estimate: Cost,
    pub predecessor: String,
}

/// Frontier contents after a successful relaxation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TraceRow {
    /// Code of the city being expanded.
    pub processed: String,
    pub entries: Vec<TraceEntry>,
}

/// Final ledger state for one city.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TrackerLine {
    pub city: CityRef,
    pub heuristic: Cost,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<Cost>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accumulated: Option<Cost>,
    /// Predecessor code, `"source"` for the source city.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predecessor: Option<String>,
}

/// Structured result of a finished search that consumers can serialise or render.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SearchSummary {
    pub source: CityRef,
    pub goal: CityRef,
    pub outcome: SearchOutcome,
    pub relaxations: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<Cost>,
    pub steps: Vec<RouteStep>,
    pub max_frontier_len: usize,
    pub trace: Vec<TraceRow>,
    pub tracker: Vec<TrackerLine>,
}

impl SearchSummary {
    /// Collect the results of the engine's last search.
    pub fn from_engine(engine: &SearchEngine<'_>) -> Result<Self> {
        let (Some(outcome), Some(source), Some(goal)) =
            (engine.outcome(), engine.source(), engine.goal())
        else {
            return Err(Error::SearchNotRun);
        };
        let graph = engine.distances();

        let steps = engine
            .path()
            .map(|path| route_steps(graph, &path))
            .unwrap_or_default();
        let total_distance = steps.last().map(|step| step.cumulative_distance);

        let trace = engine
            .trace()
            .iter()
            .map(|snapshot| trace_row(graph, snapshot))
            .collect();

        let tracker = engine
            .tracker()
            .rows()
            .iter()
            .enumerate()
            .map(|(index, row)| TrackerLine {
                city: CityRef::resolve(graph, index),
                heuristic: row.heuristic,
                estimate: row.best.map(|best| best.estimate),
                accumulated: row.best.map(|best| best.accumulated),
                predecessor: row.best.map(|best| match best.predecessor {
                    Predecessor::Source => "source".to_string(),
                    Predecessor::City(city) => code(graph, city).to_string(),
                }),
            })
            .collect();

        Ok(Self {
            source: CityRef::resolve(graph, source),
            goal: CityRef::resolve(graph, goal),
            outcome,
            relaxations: engine.relaxation_count(),
            total_distance,
            steps,
            max_frontier_len: engine.max_frontier_len(),
            trace,
            tracker,
        })
    }

    pub fn goal_reached(&self) -> bool {
        self.outcome == SearchOutcome::GoalReached
    }

    /// Tabular frontier trace: one row per snapshot, one column group per entry.
    pub fn frontier_table(&self) -> String {
        let columns = self
            .trace
            .iter()
            .map(|row| row.entries.len())
            .max()
            .unwrap_or(0)
            .max(self.max_frontier_len);

        let mut buffer = String::new();
        let _ = writeln!(buffer, "City |{}", GROUP_HEADER.repeat(columns));
        let _ = writeln!(buffer, "-----|{}", GROUP_RULE.repeat(columns));
        for row in &self.trace {
            let _ = write!(buffer, "{:<5}|", row.processed);
            for entry in &row.entries {
                let _ = write!(
                    buffer,
                    " {:<4} {:>3} {:<4} |",
                    entry.city, entry.estimate, entry.predecessor
                );
            }
            let padding = columns.saturating_sub(row.entries.len());
            let _ = writeln!(buffer, "{}", GROUP_BLANK.repeat(padding));
        }
        if self.goal_reached() {
            let _ = writeln!(
                buffer,
                "{:<5}|{}",
                self.goal.code,
                GROUP_BLANK.repeat(columns)
            );
        }
        buffer
    }

    /// Tabular route from source to goal.
    pub fn path_table(&self) -> Result<String> {
        if self.steps.is_empty() {
            return Err(Error::RouteNotFound {
                start: self.source.name.clone(),
                goal: self.goal.name.clone(),
            });
        }

        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "{:<6}{:<22}{:<11}{:>8}{:>16}",
            "City", "City Name", "Next City", "Distance", "Miles Traveled"
        );
        for step in &self.steps {
            let leg = step
                .leg_distance
                .map(|distance| distance.to_string())
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(
                buffer,
                "{:<6}{:<22}{:<11}{:>8}{:>16}",
                step.city.code,
                step.city.name,
                step.next.as_deref().unwrap_or("-"),
                leg,
                step.cumulative_distance
            );
        }
        Ok(buffer)
    }

    /// Final tracker ledger, one line per city.
    pub fn tracker_table(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "{:<6}{:>6}{:>8}{:>6}{:>7}  {:<6}{}",
            "Index", "f()", "Prev", "h", "g", "Code", "City"
        );
        for line in &self.tracker {
            let _ = writeln!(
                buffer,
                "{:<6}{:>6}{:>8}{:>6}{:>7}  {:<6}{}",
                line.city.index,
                optional(line.estimate),
                line.predecessor.as_deref().unwrap_or("-"),
                line.heuristic,
                optional(line.accumulated),
                line.city.code,
                line.city.name
            );
        }
        buffer
    }

    /// Full plain-text report: frontier trace, banner, path table and work count.
    pub fn render_plain(&self, include_tracker: bool) -> Result<String> {
        let mut buffer = self.frontier_table();
        let _ = writeln!(buffer);
        let _ = writeln!(buffer, "{PATH_BANNER}");
        buffer.push_str(&self.path_table()?);
        let _ = writeln!(buffer);
        let _ = writeln!(buffer, "Relaxations: {}", self.relaxations);
        if include_tracker {
            let _ = writeln!(buffer);
            buffer.push_str(&self.tracker_table());
        }
        Ok(buffer)
    }
}

/// Aligned index of every city in the graph: index, name, code.
pub fn render_city_index(graph: &Graph) -> String {
    let mut buffer = String::new();
    for (index, title) in graph.cities() {
        let _ = writeln!(buffer, "{:>3}  {:<20}  {}", index, title.name, title.code);
    }
    buffer
}

fn route_steps(graph: &Graph, path: &[CityId]) -> Vec<RouteStep> {
    let mut cumulative = 0;
    path.iter()
        .enumerate()
        .map(|(position, &city)| {
            let next = path.get(position + 1).copied();
            let leg_distance = next.map(|next| graph.distance(city, next));
            let step = RouteStep {
                city: CityRef::resolve(graph, city),
                next: next.map(|next| code(graph, next).to_string()),
                leg_distance,
                cumulative_distance: cumulative,
            };
            cumulative += leg_distance.unwrap_or(0);
            step
        })
        .collect()
}

fn trace_row(graph: &Graph, snapshot: &FrontierSnapshot) -> TraceRow {
    TraceRow {
        processed: code(graph, snapshot.processed).to_string(),
        entries: snapshot
            .entries
            .iter()
            .map(|entry| TraceEntry {
                city: code(graph, entry.city).to_string(),
                estimate: entry.estimate,
                predecessor: code(graph, entry.predecessor).to_string(),
            })
            .collect(),
    }
}

fn code(graph: &Graph, city: CityId) -> &str {
    graph.city_code(city).unwrap_or("<unknown>")
}

fn optional(value: Option<Cost>) -> String {
    value
        .map(|value| value.to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::CityTitle;

    fn graphs(edges: &[(CityId, CityId, Cost)]) -> (Graph, Graph) {
        let titles: Vec<CityTitle> = [("Alpha", "A"), ("Bravo", "B"), ("Charlie", "C")]
            .iter()
            .map(|(name, code)| CityTitle::new(*name, *code))
            .collect();
        let distances = Graph::from_edges(titles.clone(), edges);
        let heuristics = Graph::from_edges(titles, &[(0, 2, 4), (1, 2, 2)]);
        (distances, heuristics)
    }

    #[test]
    fn summary_requires_a_finished_search() {
        let (distances, heuristics) = graphs(&[]);
        let engine = SearchEngine::new(&distances, &heuristics).expect("same size");
        assert!(matches!(
            SearchSummary::from_engine(&engine),
            Err(Error::SearchNotRun)
        ));
    }

    #[test]
    fn summary_accumulates_leg_distances() {
        let (distances, heuristics) = graphs(&[(0, 1, 3), (1, 2, 2)]);
        let mut engine = SearchEngine::new(&distances, &heuristics).expect("same size");
        engine.search("Alpha", "C").expect("known cities");

        let summary = SearchSummary::from_engine(&engine).expect("search ran");
        assert_eq!(summary.total_distance, Some(5));
        let legs: Vec<_> = summary
            .steps
            .iter()
            .map(|step| (step.city.code.as_str(), step.leg_distance, step.cumulative_distance))
            .collect();
        assert_eq!(
            legs,
            vec![("A", Some(3), 0), ("B", Some(2), 3), ("C", None, 5)]
        );
        assert_eq!(summary.steps[0].next.as_deref(), Some("B"));
        assert_eq!(summary.steps[2].next, None);
    }

    #[test]
    fn frontier_table_pads_rows_and_closes_with_goal() {
        let (distances, heuristics) = graphs(&[(0, 1, 3), (1, 2, 2)]);
        let mut engine = SearchEngine::new(&distances, &heuristics).expect("same size");
        engine.search("A", "C").expect("known cities");
        let table = SearchSummary::from_engine(&engine)
            .expect("search ran")
            .frontier_table();

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "City | City f() Prev |");
        assert_eq!(lines[1], "-----|---------------|");
        assert_eq!(lines[2], "A    | B      5 A    |");
        assert_eq!(lines[3], "B    | C      5 B    |");
        assert_eq!(lines[4], "C    |               |");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn path_table_fails_for_exhausted_search() {
        let (distances, heuristics) = graphs(&[(0, 1, 3)]);
        let mut engine = SearchEngine::new(&distances, &heuristics).expect("same size");
        engine.search("A", "C").expect("known cities");

        let summary = SearchSummary::from_engine(&engine).expect("search ran");
        assert!(!summary.goal_reached());
        assert!(summary.steps.is_empty());
        let error = summary.path_table().expect_err("no route");
        assert_eq!(error.to_string(), "no route found between Alpha and Charlie");
        assert!(!summary.frontier_table().contains("C    |"));
    }

    #[test]
    fn tracker_table_marks_unreached_cities() {
        let (distances, heuristics) = graphs(&[(0, 1, 3)]);
        let mut engine = SearchEngine::new(&distances, &heuristics).expect("same size");
        engine.search("A", "C").expect("known cities");

        let summary = SearchSummary::from_engine(&engine).expect("search ran");
        assert_eq!(summary.tracker[0].predecessor.as_deref(), Some("source"));
        assert_eq!(summary.tracker[1].predecessor.as_deref(), Some("A"));
        assert_eq!(summary.tracker[2].estimate, None);

        let table = summary.tracker_table();
        let last = table.lines().last().expect("one line per city");
        assert!(last.contains("Charlie"));
        assert!(last.trim_start().starts_with('2'));
    }

    #[test]
    fn render_plain_orders_sections() {
        let (distances, heuristics) = graphs(&[(0, 1, 3), (1, 2, 2)]);
        let mut engine = SearchEngine::new(&distances, &heuristics).expect("same size");
        engine.search("A", "C").expect("known cities");

        let report = SearchSummary::from_engine(&engine)
            .expect("search ran")
            .render_plain(false)
            .expect("route exists");
        let banner = report.find(PATH_BANNER).expect("banner present");
        let trace = report.find("City | City f() Prev |").expect("trace present");
        let relaxations = report.find("Relaxations: 2").expect("work count present");
        assert!(trace < banner && banner < relaxations);
        assert!(!report.contains("Index"));
    }

    #[test]
    fn city_index_lists_every_title() {
        let (distances, _) = graphs(&[]);
        let index = render_city_index(&distances);
        let lines: Vec<&str> = index.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("  1  Bravo"));
        assert!(lines[1].ends_with('B'));
    }

    #[test]
    fn summary_serialises_outcome_in_snake_case() {
        let (distances, heuristics) = graphs(&[(0, 1, 3)]);
        let mut engine = SearchEngine::new(&distances, &heuristics).expect("same size");
        engine.search("A", "C").expect("known cities");
        let summary = SearchSummary::from_engine(&engine).expect("search ran");

        let json = serde_json::to_value(&summary).expect("serialises");
        assert_eq!(json["outcome"], "frontier_exhausted");
        assert!(json.get("total_distance").is_none());
        assert_eq!(json["trace"][0]["processed"], "A");
    }
}
