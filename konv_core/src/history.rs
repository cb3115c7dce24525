//! Conversion history with bounded, most-recent-first storage.
//!
//! Entries are only added on an explicit save, never on every conversion.
//! The history file is a versioned JSON document:
//!
//! ```json
//! { "version": 1, "entries": [ { "id": "...", "recorded_at": "...", ... } ] }
//! ```
//!
//! Loading is tolerant: a missing, unreadable or corrupt file is an empty
//! history, and individual entries that fail validation are dropped.

use crate::persist::{read_locked, write_json_atomic, WriteLock};
use crate::{HistoryEntry, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Current on-disk schema version
pub const HISTORY_SCHEMA_VERSION: u32 = 1;

/// Default number of entries kept
pub const DEFAULT_CAPACITY: usize = 50;

#[derive(Serialize)]
struct HistoryFileOut<'a> {
    version: u32,
    entries: &'a [HistoryEntry],
}

#[derive(Deserialize)]
struct HistoryFileIn {
    version: u32,
    #[serde(default)]
    entries: Vec<serde_json::Value>,
}

/// History backed by a JSON file
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    capacity: usize,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Empty store bound to `path`; nothing is read or written
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity: capacity.max(1),
            entries: Vec::new(),
        }
    }

    /// Load history from a file
    ///
    /// Never fails on bad contents: corrupt storage is logged and treated as
    /// an empty history. Entries beyond `capacity` are dropped.
    pub fn load(path: impl Into<PathBuf>, capacity: usize) -> Result<Self> {
        let mut store = Self::new(path, capacity);

        let Some(contents) = read_locked(&store.path) else {
            return Ok(store);
        };

        let file = match serde_json::from_str::<HistoryFileIn>(&contents) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(
                    "Failed to parse history file {:?}: {}. Starting with empty history.",
                    store.path,
                    e
                );
                return Ok(store);
            }
        };

        if file.version > HISTORY_SCHEMA_VERSION {
            tracing::warn!(
                "History file {:?} has unsupported version {} (expected {}). Starting with empty history.",
                store.path,
                file.version,
                HISTORY_SCHEMA_VERSION
            );
            return Ok(store);
        }

        for (index, raw) in file.entries.into_iter().enumerate() {
            let entry = match serde_json::from_value::<HistoryEntry>(raw) {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping history entry {}: {}", index, e);
                    continue;
                }
            };
            let errors = entry.validate();
            if !errors.is_empty() {
                tracing::warn!("Skipping history entry {}: {}", index, errors.join("; "));
                continue;
            }
            store.entries.push(entry);
        }

        if store.entries.len() > store.capacity {
            tracing::debug!(
                "Truncating history from {} to {} entries",
                store.entries.len(),
                store.capacity
            );
            store.entries.truncate(store.capacity);
        }

        tracing::debug!(
            "Loaded {} history entries from {:?}",
            store.entries.len(),
            store.path
        );
        Ok(store)
    }

    /// Save history atomically
    pub fn save(&self) -> Result<()> {
        write_json_atomic(
            &self.path,
            &HistoryFileOut {
                version: HISTORY_SCHEMA_VERSION,
                entries: &self.entries,
            },
        )?;
        tracing::info!("Saved {} history entries", self.entries.len());
        Ok(())
    }

    /// Load history, modify it, and save it back
    ///
    /// The whole cycle runs under the history write lock, so concurrent
    /// updates are applied one after another and none is lost.
    pub fn update<F, T>(path: &Path, capacity: usize, f: F) -> Result<T>
    where
        F: FnOnce(&mut HistoryStore) -> T,
    {
        let _lock = WriteLock::acquire(path)?;
        let mut store = Self::load(path, capacity)?;
        let out = f(&mut store);
        store.save()?;
        Ok(out)
    }

    /// Add an entry at the front, evicting the oldest beyond capacity
    ///
    /// Returns the number of evicted entries.
    pub fn push(&mut self, entry: HistoryEntry) -> usize {
        self.entries.insert(0, entry);
        let evicted = self.entries.len().saturating_sub(self.capacity);
        self.entries.truncate(self.capacity);
        evicted
    }

    /// Remove one entry by id
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries, newest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
