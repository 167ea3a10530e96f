//! Locating and loading the spot and edge files.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use scenic_nav_lib::dataset::{SAMPLE_EDGES_CSV, SAMPLE_SPOTS_JSON};
use scenic_nav_lib::Dataset;

pub const DEFAULT_SPOTS_FILE: &str = "spots.json";
pub const DEFAULT_EDGES_FILE: &str = "graph.csv";

/// Resolved locations of the two record files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub spots: PathBuf,
    pub edges: PathBuf,
}

impl DataPaths {
    /// Explicit file overrides win; otherwise the default file names inside
    /// `data_dir` are used.
    pub fn resolve(data_dir: &Path, spots: Option<&Path>, edges: Option<&Path>) -> Self {
        Self {
            spots: spots
                .map(Path::to_path_buf)
                .unwrap_or_else(|| data_dir.join(DEFAULT_SPOTS_FILE)),
            edges: edges
                .map(Path::to_path_buf)
                .unwrap_or_else(|| data_dir.join(DEFAULT_EDGES_FILE)),
        }
    }
}

/// Open both files and seed the engine.
pub fn load_dataset(paths: &DataPaths, directed: bool) -> Result<Dataset> {
    debug!(spots = %paths.spots.display(), edges = %paths.edges.display(), "loading dataset");
    let spots = File::open(&paths.spots)
        .with_context(|| format!("failed to open spot records at {}", paths.spots.display()))?;
    let edges = File::open(&paths.edges)
        .with_context(|| format!("failed to open edge records at {}", paths.edges.display()))?;

    let dataset = Dataset::from_readers(BufReader::new(spots), BufReader::new(edges), directed)
        .with_context(|| {
            format!(
                "failed to load dataset from {} and {}",
                paths.spots.display(),
                paths.edges.display()
            )
        })?;

    if dataset.report.skipped > 0 {
        info!(
            skipped = dataset.report.skipped,
            "some edge records referenced unknown spots"
        );
    }
    Ok(dataset)
}

/// Write the bundled sample files into `dir`, refusing to clobber existing
/// files unless `force` is set.
pub fn write_sample(dir: &Path, force: bool) -> Result<DataPaths> {
    let paths = DataPaths::resolve(dir, None, None);
    if !force {
        for existing in [&paths.spots, &paths.edges] {
            if existing.exists() {
                bail!(
                    "{} already exists; pass --force to overwrite",
                    existing.display()
                );
            }
        }
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create data directory {}", dir.display()))?;
    fs::write(&paths.spots, SAMPLE_SPOTS_JSON)
        .with_context(|| format!("failed to write {}", paths.spots.display()))?;
    fs::write(&paths.edges, SAMPLE_EDGES_CSV)
        .with_context(|| format!("failed to write {}", paths.edges.display()))?;
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_defaults() {
        let paths = DataPaths::resolve(Path::new("data"), Some(Path::new("/tmp/s.json")), None);
        assert_eq!(paths.spots, PathBuf::from("/tmp/s.json"));
        assert_eq!(paths.edges, PathBuf::from("data").join(DEFAULT_EDGES_FILE));
    }

    #[test]
    fn missing_files_mention_their_path() {
        let paths = DataPaths::resolve(Path::new("/definitely/not/here"), None, None);
        let err = load_dataset(&paths, false).expect_err("files are missing");
        assert!(format!("{err:#}").contains("/definitely/not/here/spots.json"));
    }
}
