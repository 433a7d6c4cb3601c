//! Prm document service
//!
//! File-backed operations over parameter trees: load, save, diff and merge.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::error_ext::{DomainResultExt, IoResultExt};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{diff, merge, to_prm_string, Difference, ParameterTree, TreeBuilder};
use crate::infrastructure::traits::FileSystem;

/// Service for reading, writing and comparing prm files.
pub struct PrmService {
    fs: Arc<dyn FileSystem>,
    builder: TreeBuilder,
}

impl PrmService {
    /// Create a new prm service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            builder: TreeBuilder::new(),
        }
    }

    /// Parse the prm file at `path` into a tree.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<ParameterTree> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::OperationFailed {
                context: format!("prm file not found: {}", path.display()),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "file does not exist",
                )),
            });
        }

        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read prm file", path)?;
        let tree = self.builder.build_from_str(&content).in_document(path)?;
        debug!(
            "load: {} parameters from {}",
            tree.leaf_count(),
            path.display()
        );
        Ok(tree)
    }

    /// Render `tree` and write it to `path`, creating parent directories.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn save(&self, tree: &ParameterTree, path: &Path) -> ApplicationResult<()> {
        self.fs
            .ensure_parent(path)
            .with_path_context("create parent directory", path)?;
        self.fs
            .write(path, &to_prm_string(tree))
            .with_path_context("write prm file", path)?;
        info!("wrote {}", path.display());
        Ok(())
    }

    /// Differences between two prm files (`a` is input 1, `b` is input 2).
    pub fn diff_files(&self, a: &Path, b: &Path) -> ApplicationResult<Vec<Difference>> {
        let left = self.load(a)?;
        let right = self.load(b)?;
        let differences = diff(&left, &right);
        debug!("diff_files: {} differences", differences.len());
        Ok(differences)
    }

    /// Load `base` and merge each overlay on top, in order.
    pub fn merge_files(&self, base: &Path, overlays: &[PathBuf]) -> ApplicationResult<ParameterTree> {
        let mut tree = self.load(base)?;
        for overlay in overlays {
            let src = self.load(overlay)?;
            merge(&mut tree, &src).in_document(overlay)?;
            debug!("merge_files: applied {}", overlay.display());
        }
        Ok(tree)
    }
}
