//! Shell command mode: executables found on the search path, with previously
//! run commands ranked first. Free-text input is accepted as a command too.

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Result, bail};
use sift_mode_api::{History, MenuOutcome, Mode, ModeEvent, Selection, token_match};

pub const MODE_NAME: &str = "commands";

/// Menu over the executables on a `PATH`-style search path.
pub struct CommandsMode {
    entries: Vec<String>,
    history: Mutex<History>,
}

impl CommandsMode {
    /// Scan `search_path` (a `PATH`-style list of directories) for
    /// executables. Commands recorded in the run history at `history_path`
    /// rank first, by usage.
    pub fn new(search_path: &OsStr, history_path: impl Into<PathBuf>) -> Self {
        let history = History::load(history_path);
        let scanned = scan(search_path);

        let mut entries: Vec<String> = history.values().map(str::to_string).collect();
        entries.extend(
            scanned
                .into_iter()
                .filter(|command| !history.contains(command)),
        );

        log::info!("commands mode loaded {} entries", entries.len());
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

impl Mode for CommandsMode {
    fn name(&self) -> &str {
        MODE_NAME
    }

    fn count(&self) -> usize {
        self.entries.len()
    }

    fn display_text(&self, index: usize) -> String {
        self.entries[index].clone()
    }

    fn completion_text(&self, index: usize) -> String {
        self.entries[index].clone()
    }

    fn is_ascii(&self, index: usize) -> bool {
        self.entries[index].is_ascii()
    }

    fn token_match(
        &self,
        tokens: &[String],
        ascii: bool,
        case_sensitive: bool,
        index: usize,
    ) -> bool {
        token_match(tokens, &[self.entries[index].as_str()], ascii, case_sensitive)
    }

    fn handle_result(&self, outcome: &MenuOutcome) -> Result<ModeEvent> {
        match outcome {
            MenuOutcome::Accept { index, alternate } => {
                let command = &self.entries[*index];
                self.with_history(|history| history.record(command))?;
                Ok(ModeEvent::Done(Selection {
                    mode: MODE_NAME.to_string(),
                    value: command.clone(),
                    alternate: *alternate,
                }))
            }
            MenuOutcome::CustomInput { text, alternate } => {
                self.with_history(|history| history.record(text))?;
                Ok(ModeEvent::Done(Selection {
                    mode: MODE_NAME.to_string(),
                    value: text.clone(),
                    alternate: *alternate,
                }))
            }
            MenuOutcome::DeleteEntry { index } => {
                let command = &self.entries[*index];
                self.with_history(|history| history.remove(command))?;
                Ok(ModeEvent::Reload)
            }
            MenuOutcome::SwitchMode(_) | MenuOutcome::Cancel => {
                bail!("outcome is not consumed by a mode")
            }
        }
    }
}

fn scan(search_path: &OsStr) -> BTreeSet<String> {
    let mut commands = BTreeSet::new();
    for dir in std::env::split_paths(search_path) {
        let items = match fs::read_dir(&dir) {
            Ok(items) => items,
            Err(err) => {
                log::debug!("skipping search path dir {}: {err}", dir.display());
                continue;
            }
        };
        for item in items.flatten() {
            if !is_executable_file(&item) {
                continue;
            }
            if let Some(command) = item.file_name().to_str() {
                commands.insert(command.to_string());
            }
        }
    }
    commands
}

#[cfg(unix)]
fn is_executable_file(item: &fs::DirEntry) -> bool {
    use std::os::unix::fs::PermissionsExt;

    match item.metadata() {
        Ok(metadata) => metadata.is_file() && metadata.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_executable_file(item: &fs::DirEntry) -> bool {
    item.metadata().map(|metadata| metadata.is_file()).unwrap_or(false)
}
