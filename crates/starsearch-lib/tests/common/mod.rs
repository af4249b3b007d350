#![allow(dead_code)]

use std::path::PathBuf;

use starsearch_lib::{CityTitle, Cost, Dataset, DatasetPaths, Graph};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn fixture_dataset() -> Dataset {
    DatasetPaths::in_dir(&fixtures_dir())
        .load()
        .expect("fixture matrices load")
}

/// City titles whose names and codes are both the given letters.
pub fn lettered(codes: &[&str]) -> Vec<CityTitle> {
    codes
        .iter()
        .map(|code| CityTitle::new(*code, *code))
        .collect()
}

/// Four cities A..D with A-B=1, B-C=1, A-C=5 and, optionally, C-D=1.
pub fn diamond(connect_goal: bool) -> Graph {
    let mut edges: Vec<(usize, usize, Cost)> = vec![(0, 1, 1), (1, 2, 1), (0, 2, 5)];
    if connect_goal {
        edges.push((2, 3, 1));
    }
    Graph::from_edges(lettered(&["A", "B", "C", "D"]), &edges)
}

/// Heuristic distances to D: A=3, B=2, C=1.
pub fn diamond_heuristics() -> Graph {
    Graph::from_edges(
        lettered(&["A", "B", "C", "D"]),
        &[(0, 3, 3), (1, 3, 2), (2, 3, 1)],
    )
}
