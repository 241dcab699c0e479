use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// The set of listing ids already processed, backed by a flat JSON file.
///
/// Single writer: owned by the scan loop. The set only grows; re-evaluating
/// a listing whose record was lost is harmless, so load failures degrade to
/// an empty set instead of stopping the process.
pub struct SeenStore {
    path: PathBuf,
    ids: HashSet<String>,
}

impl SeenStore {
    /// Load the persisted id set. A missing or unreadable file means a fresh
    /// start; malformed content is logged and discarded.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let ids = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(ids) => ids.into_iter().collect(),
                Err(e) => {
                    warn!("Ignoring malformed seen file {}: {e}", path.display());
                    HashSet::new()
                }
            },
            Err(_) => {
                debug!("No seen file at {}, starting empty", path.display());
                HashSet::new()
            }
        };
        Self { path, ids }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Record an id as processed. Returns false if it was already known.
    pub fn insert(&mut self, id: String) -> bool {
        self.ids.insert(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Write the full id set as a sorted JSON array. Sorting keeps the file
    /// diffable; order carries no meaning.
    pub fn persist(&self) -> Result<()> {
        let mut ids: Vec<&String> = self.ids.iter().collect();
        ids.sort();
        let raw = serde_json::to_string(&ids).context("Failed to serialize seen ids")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write seen file {}", self.path.display()))
    }
}
