//! Desktop-application launcher mode: scans application directories for
//! desktop entries and surfaces previously launched ones first.

mod desktop;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Result, bail};
use sift_mode_api::{History, MenuOutcome, Mode, ModeEvent, Selection, token_match};

use crate::desktop::DesktopEntry;

pub const MODE_NAME: &str = "apps";

#[derive(Debug)]
struct AppEntry {
    name: String,
    generic: Option<String>,
    exec: String,
    /// Desktop file name; the stable key for launch history.
    id: String,
}

/// Launcher over the desktop entries found in a set of application
/// directories.
pub struct AppsMode {
    entries: Vec<AppEntry>,
    history: Mutex<History>,
}

impl AppsMode {
    /// Scan `application_dirs` for desktop entries. Entries recorded in the
    /// launch history at `history_path` are ordered first, by usage; the
    /// rest follow alphabetically.
    pub fn new(application_dirs: &[PathBuf], history_path: impl Into<PathBuf>) -> Self {
        let history = History::load(history_path);
        let mut scanned = scan(application_dirs);

        let mut entries = Vec::with_capacity(scanned.len());
        for value in history.values() {
            if let Some(position) = scanned.iter().position(|entry| entry.id == value) {
                entries.push(scanned.remove(position));
            }
        }
        scanned.sort_by(|a, b| a.name.cmp(&b.name));
        entries.extend(scanned);

        log::info!("apps mode loaded {} desktop entries", entries.len());
        Self {
            entries,
            history: Mutex::new(history),
        }
    }

    fn with_history<T>(&self, action: impl FnOnce(&mut History) -> T) -> T {
        let mut guard = match self.history.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        action(&mut guard)
    }
}

impl Mode for AppsMode {
    fn name(&self) -> &str {
        MODE_NAME
    }

    fn count(&self) -> usize {
        self.entries.len()
    }

    fn display_text(&self, index: usize) -> String {
        let entry = &self.entries[index];
        match &entry.generic {
            Some(generic) => format!("{} ({generic})", entry.name),
            None => entry.name.clone(),
        }
    }

    fn completion_text(&self, index: usize) -> String {
        self.entries[index].name.clone()
    }

    fn is_ascii(&self, index: usize) -> bool {
        let entry = &self.entries[index];
        entry.name.is_ascii()
            && entry.exec.is_ascii()
            && entry.generic.as_deref().is_none_or(str::is_ascii)
    }

    fn token_match(
        &self,
        tokens: &[String],
        ascii: bool,
        case_sensitive: bool,
        index: usize,
    ) -> bool {
        let entry = &self.entries[index];
        let mut fields = vec![entry.name.as_str(), entry.exec.as_str()];
        if let Some(generic) = &entry.generic {
            fields.push(generic.as_str());
        }
        token_match(tokens, &fields, ascii, case_sensitive)
    }

    fn handle_result(&self, outcome: &MenuOutcome) -> Result<ModeEvent> {
        match outcome {
            MenuOutcome::Accept { index, alternate } => {
                let entry = &self.entries[*index];
                self.with_history(|history| history.record(&entry.id))?;
                Ok(ModeEvent::Done(Selection {
                    mode: MODE_NAME.to_string(),
                    value: entry.exec.clone(),
                    alternate: *alternate,
                }))
            }
            MenuOutcome::CustomInput { text, alternate } => Ok(ModeEvent::Done(Selection {
                mode: MODE_NAME.to_string(),
                value: text.clone(),
                alternate: *alternate,
            })),
            MenuOutcome::DeleteEntry { index } => {
                let entry = &self.entries[*index];
                self.with_history(|history| history.remove(&entry.id))?;
                Ok(ModeEvent::Reload)
            }
            MenuOutcome::SwitchMode(_) | MenuOutcome::Cancel => {
                bail!("outcome is not consumed by a mode")
            }
        }
    }
}

fn scan(dirs: &[PathBuf]) -> Vec<AppEntry> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for dir in dirs {
        let items = match fs::read_dir(dir) {
            Ok(items) => items,
            Err(err) => {
                log::debug!("skipping application dir {}: {err}", dir.display());
                continue;
            }
        };
        for item in items.flatten() {
            let path = item.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("desktop") {
                continue;
            }
            let Some(id) = path
                .file_name()
                .and_then(|file_name| file_name.to_str())
                .map(str::to_string)
            else {
                continue;
            };
            // Earlier directories shadow later ones for the same id.
            if !seen.insert(id.clone()) {
                continue;
            }
            if let Some(entry) = load_entry(&path) {
                entries.push(AppEntry {
                    name: entry.name,
                    generic: entry.generic,
                    exec: entry.exec,
                    id,
                });
            }
        }
    }

    entries
}

fn load_entry(path: &Path) -> Option<DesktopEntry> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let entry = desktop::parse(&contents);
            if entry.is_none() {
                log::debug!("ignoring desktop entry {}", path.display());
            }
            entry
        }
        Err(err) => {
            log::warn!("failed to read desktop entry {}: {err}", path.display());
            None
        }
    }
}
