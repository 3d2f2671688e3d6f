use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use sift::app_dirs;
use sift_mode_api::{MenuOutcome, Mode, ModeEvent, ModeSwitch, Selection};
use sift_modes_apps::AppsMode;
use sift_modes_commands::CommandsMode;
use sift_view::FilterEngine;

use crate::settings::{ResolvedConfig, StartMode};

/// Modes offered by the binary, in switch order.
const MODES: [StartMode; 2] = [StartMode::Apps, StartMode::Commands];

/// Final outcome of a menu session.
pub(crate) struct SessionOutcome {
    pub(crate) accepted: bool,
    pub(crate) selection: Option<Selection>,
}

/// Coordinates building modes and driving the menu until a final outcome.
pub(crate) struct MenuSession {
    config: ResolvedConfig,
    engine: FilterEngine,
    data_dir: PathBuf,
    active: usize,
}

impl MenuSession {
    pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
        let engine = FilterEngine::new(config.menu.threads)?;
        let data_dir = app_dirs::get_data_dir()?;
        log::debug!("storing usage histories under {}", data_dir.display());
        let active = MODES
            .iter()
            .position(|mode| *mode == config.start_mode)
            .unwrap_or(0);

        Ok(Self {
            config,
            engine,
            data_dir,
            active,
        })
    }

    /// Drive the menu until the user accepts an entry or cancels.
    ///
    /// Mode switches and reloads rebuild the active mode from scratch, which
    /// rescans its sources and rereads its usage history.
    pub(crate) fn run(mut self) -> Result<SessionOutcome> {
        let mut mode = self.build_active();

        loop {
            let outcome =
                sift_view::run(Arc::clone(&mode), self.config.menu.clone(), &self.engine)?;
            match outcome {
                MenuOutcome::Cancel => {
                    return Ok(SessionOutcome {
                        accepted: false,
                        selection: None,
                    });
                }
                MenuOutcome::SwitchMode(direction) => {
                    self.active = match direction {
                        ModeSwitch::Next => (self.active + 1) % MODES.len(),
                        ModeSwitch::Previous => (self.active + MODES.len() - 1) % MODES.len(),
                    };
                    mode = self.build_active();
                }
                other => match mode.handle_result(&other)? {
                    ModeEvent::Done(selection) => {
                        return Ok(SessionOutcome {
                            accepted: true,
                            selection: Some(selection),
                        });
                    }
                    ModeEvent::Reload => mode = self.build_active(),
                },
            }
        }
    }

    fn build_active(&self) -> Arc<dyn Mode> {
        match MODES[self.active] {
            StartMode::Apps => Arc::new(AppsMode::new(
                &self.config.application_dirs,
                self.data_dir.join("apps_history"),
            )),
            StartMode::Commands => {
                let search_path = env::var_os("PATH").unwrap_or_default();
                Arc::new(CommandsMode::new(
                    &search_path,
                    self.data_dir.join("commands_history"),
                ))
            }
        }
    }
}
