use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Most entries a history file keeps. When full, the least-used entry is
/// evicted to make room.
const MAX_ENTRIES: usize = 25;

/// Per-mode usage history, persisted as one `uses value` line per entry.
///
/// Entries are kept sorted most-used first so modes can surface previously
/// chosen items ahead of freshly scanned ones.
#[derive(Debug)]
pub struct History {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

#[derive(Debug)]
struct HistoryEntry {
    value: String,
    uses: u32,
}

impl History {
    /// Load history from `path`. A missing file is an empty history;
    /// unreadable files or malformed lines are skipped with a log message.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => parse(&contents, &path),
            Err(err) if err.kind() == ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                log::warn!("failed to read history file {}: {err}", path.display());
                Vec::new()
            }
        };

        let mut history = Self { path, entries };
        history.sort();
        history
    }

    /// Entry values, most-used first.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.entries.iter().any(|entry| entry.value == value)
    }

    /// Record one use of `value`, inserting it if new, and persist the file.
    pub fn record(&mut self, value: &str) -> Result<()> {
        match self.entries.iter_mut().find(|entry| entry.value == value) {
            Some(entry) => entry.uses = entry.uses.saturating_add(1),
            None => {
                if self.entries.len() >= MAX_ENTRIES {
                    // Entries are sorted by use count, so the evictee is last.
                    self.entries.pop();
                }
                self.entries.push(HistoryEntry {
                    value: value.to_string(),
                    uses: 1,
                });
            }
        }

        self.sort();
        self.save()
    }

    /// Remove `value` from the history and persist the file.
    pub fn remove(&mut self, value: &str) -> Result<()> {
        self.entries.retain(|entry| entry.value != value);
        self.save()
    }

    fn sort(&mut self) {
        self.entries.sort_by(|a, b| b.uses.cmp(&a.uses));
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create history directory {}", parent.display())
            })?;
        }

        let mut contents = String::new();
        for entry in &self.entries {
            contents.push_str(&format!("{} {}\n", entry.uses, entry.value));
        }

        fs::write(&self.path, contents)
            .with_context(|| format!("failed to write history file {}", self.path.display()))
    }
}

fn parse(contents: &str, path: &Path) -> Vec<HistoryEntry> {
    let mut entries = Vec::new();
    for line in contents.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let Some((uses, value)) = line.split_once(' ') else {
            log::debug!("skipping malformed history line in {}", path.display());
            continue;
        };
        let Ok(uses) = uses.parse::<u32>() else {
            log::debug!("skipping malformed history line in {}", path.display());
            continue;
        };
        if value.is_empty() {
            continue;
        }
        entries.push(HistoryEntry {
            value: value.to_string(),
            uses,
        });
        if entries.len() >= MAX_ENTRIES {
            break;
        }
    }
    entries
}
