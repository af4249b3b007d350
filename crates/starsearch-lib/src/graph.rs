use std::cmp::Ordering;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{Error, Result};

/// Dense index of a city within a [`Graph`].
pub type CityId = usize;

/// Edge weight and accumulated path cost.
pub type Cost = u64;

/// Matrix entries at or above this value mean "no direct edge".
pub const NO_EDGE: Cost = 999;

/// Minimum Jaro-Winkler similarity for a title to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Primary name and short code of a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityTitle {
    pub name: String,
    pub code: String,
}

impl CityTitle {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

/// Immutable adjacency-matrix graph over a named city set.
///
/// Only the upper triangle (`a < b`) is stored, so `distance(a, b)` and
/// `distance(b, a)` always read the same cell.
#[derive(Debug, Clone)]
pub struct Graph {
    titles: Arc<[CityTitle]>,
    upper: Arc<[Cost]>,
}

impl Graph {
    /// Build a graph from a title index and a full square matrix.
    ///
    /// Cells on and below the diagonal are ignored. Row `i` is reported as
    /// line `i + 2` in shape errors, matching the matrix file layout where
    /// the header occupies line 1.
    pub fn new(titles: Vec<CityTitle>, matrix: Vec<Vec<Cost>>) -> Result<Self> {
        let len = titles.len();
        if matrix.len() != len {
            return Err(Error::TitleCountMismatch {
                codes: len,
                rows: matrix.len(),
            });
        }

        if let Some((row_index, row)) = matrix
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != len)
        {
            return Err(Error::MatrixShape {
                line: row_index + 2,
                expected: len,
                found: row.len(),
            });
        }

        Ok(Self {
            titles: titles.into(),
            upper: pack_upper(&matrix).into(),
        })
    }

    /// Build a graph from an explicit edge list; every other pair has no edge.
    ///
    /// # Panics
    ///
    /// Panics if an edge references a city outside the title index.
    pub fn from_edges(titles: Vec<CityTitle>, edges: &[(CityId, CityId, Cost)]) -> Self {
        let len = titles.len();
        let mut matrix = vec![vec![NO_EDGE; len]; len];
        for &(a, b, cost) in edges {
            assert!(a < len && b < len, "edge ({a}, {b}) outside graph of {len}");
            let (low, high) = ordered(a, b);
            matrix[low][high] = cost;
        }

        Self {
            titles: titles.into(),
            upper: pack_upper(&matrix).into(),
        }
    }

    /// Number of cities in the graph.
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Distance between two cities; zero for a city paired with itself.
    ///
    /// Values at or above [`NO_EDGE`] mean the cities are not directly linked.
    pub fn distance(&self, a: CityId, b: CityId) -> Cost {
        if a == b {
            assert!(a < self.len(), "city {a} outside graph of {}", self.len());
            return 0;
        }
        let (low, high) = ordered(a, b);
        self.upper[self.cell(low, high)]
    }

    /// Whether a direct edge links `a` and `b`.
    pub fn has_edge(&self, a: CityId, b: CityId) -> bool {
        a != b && self.distance(a, b) < NO_EDGE
    }

    /// Directly linked cities in ascending index order.
    pub fn neighbours(&self, city: CityId) -> Vec<CityId> {
        (0..self.len())
            .filter(|&other| self.has_edge(city, other))
            .collect()
    }

    /// Resolve a city by primary name first, then by short code.
    pub fn index_of(&self, name_or_code: &str) -> Option<CityId> {
        self.titles
            .iter()
            .position(|title| title.name == name_or_code)
            .or_else(|| {
                self.titles
                    .iter()
                    .position(|title| title.code == name_or_code)
            })
    }

    /// Resolve a city, producing suggestions when the lookup fails.
    pub fn resolve(&self, name_or_code: &str) -> Result<CityId> {
        self.index_of(name_or_code)
            .ok_or_else(|| Error::UnknownCity {
                name: name_or_code.to_string(),
                suggestions: self.fuzzy_city_matches(name_or_code, 3),
            })
    }

    /// City names whose name or code resembles `query`, best match first.
    pub fn fuzzy_city_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = self
            .titles
            .iter()
            .map(|title| {
                let score = strsim::jaro_winkler(query, &title.name)
                    .max(strsim::jaro_winkler(query, &title.code));
                (score, title.name.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }

    pub fn city_name(&self, city: CityId) -> Option<&str> {
        self.titles.get(city).map(|title| title.name.as_str())
    }

    pub fn city_code(&self, city: CityId) -> Option<&str> {
        self.titles.get(city).map(|title| title.code.as_str())
    }

    /// Title index in city order.
    pub fn cities(&self) -> impl Iterator<Item = (CityId, &CityTitle)> {
        self.titles.iter().enumerate()
    }

    fn cell(&self, low: CityId, high: CityId) -> usize {
        let len = self.len();
        assert!(high < len, "city {high} outside graph of {len}");
        low * len - low * (low + 1) / 2 + (high - low - 1)
    }
}

/// Cells strictly above the diagonal, row by row. Rows must be square.
fn pack_upper(matrix: &[Vec<Cost>]) -> Vec<Cost> {
    let len = matrix.len();
    let mut upper = Vec::with_capacity(len * len.saturating_sub(1) / 2);
    for (row_index, row) in matrix.iter().enumerate() {
        upper.extend_from_slice(&row[row_index + 1..]);
    }
    upper
}

fn ordered(a: CityId, b: CityId) -> (CityId, CityId) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
