use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::history::LogEntry;

/// JSON-file-backed brew log: one file holding a serialized array of
/// entries. Entries are append-only and delete-by-id; nothing is ever
/// mutated in place.
pub struct LogStore {
    path: PathBuf,
    entries: Vec<LogEntry>,
}

impl LogStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed creating log directory: {}", parent.display()))?;
        }
        let entries = if path.exists() {
            let data = fs::read_to_string(path)
                .with_context(|| format!("failed reading brew log: {}", path.display()))?;
            if data.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&data)
                    .with_context(|| format!("failed parsing brew log: {}", path.display()))?
            }
        } else {
            Vec::new()
        };
        debug!(entries = entries.len(), path = %path.display(), "opened brew log");
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Appends an entry, bumping its id past any existing one so ids
    /// stay unique even when two saves land in the same millisecond.
    pub fn append(&mut self, mut entry: LogEntry) -> Result<i64> {
        if let Some(max_id) = self.entries.iter().map(|e| e.id).max() {
            if entry.id <= max_id {
                entry.id = max_id + 1;
            }
        }
        let id = entry.id;
        self.entries.push(entry);
        self.save()?;
        Ok(id)
    }

    pub fn delete(&mut self, id: i64) -> Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        let removed = self.entries.len() != before;
        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    /// Entries newest first, the order the history list is rendered in.
    pub fn entries(&self) -> Vec<&LogEntry> {
        let mut sorted: Vec<&LogEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.id.cmp(&a.id));
        sorted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn save(&self) -> Result<()> {
        let data = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed writing brew log: {}", self.path.display()))
    }
}
