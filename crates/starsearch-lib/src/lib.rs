//! starsearch library entry points.
//!
//! This crate loads city cost matrices, builds immutable graph views over
//! them, and runs an A* search that records every frontier state it passes
//! through. Higher-level consumers (the CLI) should only depend on the
//! functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod dataset;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod matrix;
pub mod output;
pub mod search;
pub mod tracker;

pub use dataset::{resolve_data_dir, resolve_dataset, Dataset, DatasetPaths};
pub use error::{Error, Result};
pub use frontier::{Frontier, FrontierEntry, FrontierSnapshot};
pub use graph::{CityId, CityTitle, Cost, Graph, NO_EDGE};
pub use matrix::{load_graph, parse_matrix};
pub use output::{render_city_index, RouteStep, SearchSummary, TraceRow};
pub use search::{SearchEngine, SearchOutcome, SearchState};
pub use tracker::{BestPath, PathTracker, Predecessor, TrackerRow};
