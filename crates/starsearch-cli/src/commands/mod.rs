// Handlers for the CLI subcommands. main.rs parses arguments and dispatches
// here.

pub mod cities;
pub mod route;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use starsearch_lib::{resolve_data_dir, Dataset, DatasetPaths};

/// Where to find the two matrix files.
#[derive(Debug, Clone, Default)]
pub struct DataSource {
    pub data_dir: Option<PathBuf>,
    pub distances: Option<PathBuf>,
    pub heuristics: Option<PathBuf>,
}

impl DataSource {
    /// Resolve file locations. Explicit file paths win over the data directory.
    pub fn paths(&self) -> Result<DatasetPaths> {
        if let (Some(distances), Some(heuristics)) = (&self.distances, &self.heuristics) {
            return Ok(DatasetPaths {
                distances: distances.clone(),
                heuristics: heuristics.clone(),
            });
        }

        let dir = resolve_data_dir(self.data_dir.as_deref())
            .context("failed to resolve the dataset directory")?;
        let mut paths = DatasetPaths::in_dir(&dir);
        if let Some(distances) = &self.distances {
            paths.distances = distances.clone();
        }
        if let Some(heuristics) = &self.heuristics {
            paths.heuristics = heuristics.clone();
        }
        Ok(paths)
    }

    /// Load both matrices.
    pub fn load(&self) -> Result<Dataset> {
        let paths = self.paths()?;
        debug!(
            distances = %paths.distances.display(),
            heuristics = %paths.heuristics.display(),
            "loading dataset"
        );
        paths.load().with_context(|| {
            format!(
                "failed to load dataset from {} and {}",
                paths.distances.display(),
                paths.heuristics.display()
            )
        })
    }
}
