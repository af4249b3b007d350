use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::matrix::load_graph;

/// Default filename for the actual-distance matrix.
pub const DISTANCES_FILENAME: &str = "MnDOTactualDistances-spaces.txt";

/// Default filename for the heuristic-distance matrix.
pub const HEURISTICS_FILENAME: &str = "MnDOTheuristicDistances-spaces.txt";

/// Environment variable consulted when no data directory is given explicitly.
pub const DATA_DIR_ENV: &str = "STARSEARCH_DATA_DIR";

/// Locations of the two matrix files that make up a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub distances: PathBuf,
    pub heuristics: PathBuf,
}

impl DatasetPaths {
    /// Paths to the default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            distances: dir.join(DISTANCES_FILENAME),
            heuristics: dir.join(HEURISTICS_FILENAME),
        }
    }

    /// Load both matrices.
    pub fn load(&self) -> Result<Dataset> {
        Ok(Dataset {
            distances: load_graph(&self.distances)?,
            heuristics: load_graph(&self.heuristics)?,
        })
    }
}

/// Distance and heuristic graphs loaded from disk.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub distances: Graph,
    pub heuristics: Graph,
}

/// Resolve the default data directory using platform-specific project directories.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "starsearch", "starsearch")
        .ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Resolve the directory that holds the matrix files.
///
/// The resolution order is:
/// 1. Explicit `data_dir` argument when provided.
/// 2. `STARSEARCH_DATA_DIR` environment variable.
/// 3. Platform-specific project data directory.
pub fn resolve_data_dir(data_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = match data_dir {
        Some(explicit) => explicit.to_path_buf(),
        None => match env::var_os(DATA_DIR_ENV) {
            Some(env_path) => PathBuf::from(env_path),
            None => default_data_dir()?,
        },
    };
    debug!(dir = %dir.display(), "resolved dataset directory");
    Ok(dir)
}

/// Resolve the dataset file locations inside the data directory.
///
/// Both files must exist at the resolved location.
pub fn resolve_dataset(data_dir: Option<&Path>) -> Result<DatasetPaths> {
    let paths = DatasetPaths::in_dir(&resolve_data_dir(data_dir)?);
    ensure_exists(&paths.distances)?;
    ensure_exists(&paths.heuristics)?;
    Ok(paths)
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        })
    }
}
