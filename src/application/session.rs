//! Game session: the live tree and its store
//!
//! A session is created seeded, mutated by play, and has its tree replaced
//! wholesale by a successful load.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::application::services::{DecisionEngine, Outcome, StoreService};
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::{DecisionTree, ToTreeString};
use crate::infrastructure::traits::{FileSystem, LineSource, TextSink};

pub struct Session {
    tree: DecisionTree,
    store: StoreService,
    store_path: Option<PathBuf>,
    autosave: bool,
}

impl Session {
    /// Seeded session; the store path defaults to `settings.store_path`.
    pub fn new(settings: &Settings, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            tree: DecisionTree::new(settings.seed_answer.clone()),
            store: StoreService::new(fs),
            store_path: settings.store_path.clone(),
            autosave: settings.autosave,
        }
    }

    pub fn tree(&self) -> &DecisionTree {
        &self.tree
    }

    /// Swap in a new live tree, returning the previous one.
    pub fn replace_tree(&mut self, tree: DecisionTree) -> DecisionTree {
        std::mem::replace(&mut self.tree, tree)
    }

    /// Path used by `save`/`load` when none is given.
    pub fn store_path(&self) -> Option<&Path> {
        self.store_path.as_deref()
    }

    /// Play one round. With autosave on, a learned tree is saved at once.
    #[instrument(level = "debug", skip_all)]
    pub fn play(
        &mut self,
        input: &mut dyn LineSource,
        output: &mut dyn TextSink,
    ) -> ApplicationResult<Outcome> {
        let outcome = DecisionEngine::new(input, output).play(&mut self.tree)?;
        if let (Outcome::Learned { .. }, true) = (&outcome, self.autosave) {
            match self.save(None) {
                Ok(path) => info!("autosaved to {}", path.display()),
                Err(e) => warn!("autosave failed: {}", e),
            }
        }
        Ok(outcome)
    }

    /// Save the live tree. The path used becomes the session default.
    #[instrument(level = "debug", skip(self))]
    pub fn save(&mut self, path: Option<&Path>) -> ApplicationResult<PathBuf> {
        let path = self.resolve(path)?;
        self.store.save(&self.tree, &path)?;
        self.store_path = Some(path.clone());
        Ok(path)
    }

    /// Load a tree and make it live. On failure the live tree is kept.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&mut self, path: Option<&Path>) -> ApplicationResult<PathBuf> {
        let path = self.resolve(path)?;
        let tree = self.store.load(&path)?;
        self.replace_tree(tree);
        self.store_path = Some(path.clone());
        Ok(path)
    }

    /// The live tree as an indented listing.
    pub fn render(&self) -> String {
        self.tree.to_tree_string()
    }

    fn resolve(&self, path: Option<&Path>) -> ApplicationResult<PathBuf> {
        path.map(Path::to_path_buf)
            .or_else(|| self.store_path.clone())
            .ok_or(ApplicationError::NoStorePath)
    }
}
