//! Output directory for rendered figures.
//!
//! The directory is an explicit value handed to the renderer rather than a
//! process-wide default, so callers (and tests) can point it anywhere.

use std::fs::create_dir_all;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

pub const TIMESERIES_FILE: &str = "timeseries.png";
pub const BIFURCATION_FILE: &str = "bifurcation.png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigureDir {
    path: PathBuf,
}

impl FigureDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `paper/figures` at the crate root, i.e. two levels up from this module.
    pub fn default_location() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("paper").join("figures"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the directory and any missing parents. Safe to call repeatedly.
    pub fn ensure(&self) -> io::Result<&Path> {
        create_dir_all(&self.path)?;
        debug!(dir = %self.path.display(), "figure directory ready");
        Ok(&self.path)
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.path.join(file_name)
    }

    /// The explicit override if given, otherwise `file_name` inside this directory.
    pub fn resolve(&self, explicit: Option<&Path>, file_name: &str) -> PathBuf {
        match explicit {
            Some(path) => path.to_path_buf(),
            None => self.path_for(file_name),
        }
    }
}

impl Default for FigureDir {
    fn default() -> Self {
        Self::default_location()
    }
}
