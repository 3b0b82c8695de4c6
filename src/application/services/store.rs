//! Tree store service
//!
//! Saves and loads decision trees in the `[Q]`/`[A]` line format.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{codec, DecisionTree, DomainError};
use crate::infrastructure::traits::FileSystem;

/// Service for persisting decision trees.
pub struct StoreService {
    fs: Arc<dyn FileSystem>,
}

impl StoreService {
    /// Create a new store service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Write `tree` to `path`, replacing any existing store.
    ///
    /// The whole store is encoded before the file is touched.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn save(&self, tree: &DecisionTree, path: &Path) -> ApplicationResult<()> {
        let text = codec::encode(tree)?;
        self.fs
            .write(path, &text)
            .with_path_context("write tree store", path)?;
        debug!("saved {} nodes to {}", tree.len(), path.display());
        Ok(())
    }

    /// Read the tree stored at `path`.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<DecisionTree> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::StoreNotFound(path.to_path_buf()));
        }
        if !self.fs.is_file(path) {
            return Err(ApplicationError::OperationFailed {
                context: format!("read tree store: {}", path.display()),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "not a file",
                )),
            });
        }
        let bytes = self
            .fs
            .read(path)
            .with_path_context("read tree store", path)?;
        let text = String::from_utf8(bytes).map_err(|e| {
            let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
            let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
            DomainError::malformed(line, "not valid UTF-8")
        })?;
        let tree = codec::decode(&text)?;
        debug!("loaded {} nodes from {}", tree.len(), path.display());
        Ok(tree)
    }
}
