use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the starsearch library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a city name or code could not be found in the title index.
    #[error("unknown city: {name}{}", format_suggestions(.suggestions))]
    UnknownCity {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when the distance and heuristic graphs describe different city sets.
    #[error("distance graph has {distances} cities but heuristic graph has {heuristics}")]
    GraphMismatch { distances: usize, heuristics: usize },

    /// Raised when the two graphs list the same number of cities in a different order.
    #[error("city {index} is '{distances}' in the distance graph but '{heuristics}' in the heuristic graph")]
    TitleMismatch {
        index: usize,
        distances: String,
        heuristics: String,
    },

    /// Raised when a route table is requested for a search that never reached the goal.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when results are requested from an engine that has not finished a search.
    #[error("no search has been run")]
    SearchNotRun,

    /// Raised when a matrix file contained no header row.
    #[error("matrix input is empty")]
    EmptyMatrix,

    /// Raised when a matrix cell is neither a non-negative integer nor the no-edge placeholder.
    #[error("line {line}: invalid matrix cell '{token}'")]
    MatrixParse { line: usize, token: String },

    /// Raised when a matrix row carries the wrong number of cells.
    #[error("line {line}: expected {expected} cells, found {found}")]
    MatrixShape {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Raised when the header codes and the named rows do not pair up.
    #[error("matrix header lists {codes} city codes but {rows} rows were found")]
    TitleCountMismatch { codes: usize, rows: usize },

    /// Matrix file could not be located at the resolved path.
    #[error("dataset file not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the dataset location")]
    ProjectDirsUnavailable,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
