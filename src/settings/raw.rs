use std::env;
use std::path::PathBuf;

use anyhow::{Result, bail, ensure};
use serde::Deserialize;

use sift_view::{MenuConfig, ScrollMethod};

use crate::cli::CliArgs;

use super::resolved::{ResolvedConfig, StartMode};

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
    mode: Option<String>,
    menu: MenuSection,
    matching: MatchingSection,
    apps: AppsSection,
}

/// Menu layout options as they are read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct MenuSection {
    lines: Option<u16>,
    columns: Option<u16>,
    fixed_lines: Option<bool>,
    scroll: Option<String>,
}

/// Filtering behaviour options prior to validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct MatchingSection {
    case_sensitive: Option<bool>,
    sort: Option<bool>,
    auto_select: Option<bool>,
    threads: Option<usize>,
}

/// Desktop-application mode options prior to validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct AppsSection {
    directories: Option<Vec<PathBuf>>,
}

impl RawConfig {
    /// Apply CLI overrides on top of the raw configuration values.
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(mode) = cli.mode {
            self.mode = Some(mode.as_str().to_string());
        }
        if let Some(value) = cli.lines {
            self.menu.lines = Some(value);
        }
        if let Some(value) = cli.columns {
            self.menu.columns = Some(value);
        }
        if let Some(value) = cli.fixed_lines {
            self.menu.fixed_lines = Some(value);
        }
        if let Some(scroll) = cli.scroll {
            self.menu.scroll = Some(scroll.as_str().to_string());
        }
        if let Some(value) = cli.case_sensitive {
            self.matching.case_sensitive = Some(value);
        }
        if let Some(value) = cli.sort {
            self.matching.sort = Some(value);
        }
        if let Some(value) = cli.auto_select {
            self.matching.auto_select = Some(value);
        }
        if let Some(value) = cli.threads {
            self.matching.threads = Some(value);
        }
        if let Some(dirs) = &cli.app_dirs {
            self.apps.directories = Some(dirs.clone());
        }
    }

    /// Convert the raw configuration into a [`ResolvedConfig`], validating and
    /// filling defaults where required.
    pub(super) fn resolve(self) -> Result<ResolvedConfig> {
        let start_mode = match self.mode.as_deref() {
            None => StartMode::Apps,
            Some(name) => parse_mode(name)?,
        };

        let defaults = MenuConfig::default();
        let lines = self.menu.lines.unwrap_or(defaults.menu_lines);
        ensure!(lines >= 1, "menu.lines must be at least 1");
        let columns = self.menu.columns.unwrap_or(defaults.menu_columns);
        ensure!(columns >= 1, "menu.columns must be at least 1");
        let scroll = match self.menu.scroll.as_deref() {
            None => defaults.scroll,
            Some(name) => parse_scroll(name)?,
        };

        let menu = MenuConfig {
            case_sensitive: self.matching.case_sensitive.unwrap_or(false),
            sort_by_distance: self.matching.sort.unwrap_or(false),
            auto_select: self.matching.auto_select.unwrap_or(false),
            menu_lines: lines,
            menu_columns: columns,
            fixed_lines: self.menu.fixed_lines.unwrap_or(false),
            scroll,
            threads: self.matching.threads.unwrap_or(0),
        };

        let application_dirs = self
            .apps
            .directories
            .filter(|dirs| !dirs.is_empty())
            .unwrap_or_else(default_application_dirs);

        Ok(ResolvedConfig {
            start_mode,
            menu,
            application_dirs,
        })
    }
}

/// Parse a mode name from configuration or the command line.
fn parse_mode(name: &str) -> Result<StartMode> {
    match name {
        "apps" => Ok(StartMode::Apps),
        "commands" => Ok(StartMode::Commands),
        other => bail!("unknown mode '{other}' (expected 'apps' or 'commands')"),
    }
}

/// Parse a scroll method name from configuration or the command line.
fn parse_scroll(name: &str) -> Result<ScrollMethod> {
    match name {
        "paged" => Ok(ScrollMethod::Paged),
        "continuous" => Ok(ScrollMethod::Continuous),
        other => bail!("unknown scroll method '{other}' (expected 'paged' or 'continuous')"),
    }
}

/// Return the XDG data directories that may carry desktop entries.
fn default_application_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    match env::var_os("XDG_DATA_HOME").filter(|value| !value.is_empty()) {
        Some(dir) => dirs.push(PathBuf::from(dir)),
        None => {
            if let Some(home) = env::var_os("HOME").filter(|value| !value.is_empty()) {
                dirs.push(PathBuf::from(home).join(".local/share"));
            }
        }
    }

    match env::var_os("XDG_DATA_DIRS").filter(|value| !value.is_empty()) {
        Some(paths) => dirs.extend(env::split_paths(&paths)),
        None => {
            dirs.push(PathBuf::from("/usr/local/share"));
            dirs.push(PathBuf::from("/usr/share"));
        }
    }

    dirs.into_iter().map(|dir| dir.join("applications")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use sift_view::ScrollMethod;

    #[test]
    fn cli_overrides_take_precedence() {
        let mut cli = CliArgs::parse_from(["sift", "--mode", "commands"]);
        cli.lines = Some(20);
        cli.columns = Some(3);
        cli.fixed_lines = Some(true);
        cli.case_sensitive = Some(true);
        cli.sort = Some(true);
        cli.auto_select = Some(true);
        cli.threads = Some(4);
        cli.app_dirs = Some(vec![PathBuf::from("/tmp/apps")]);

        let mut config = RawConfig::default();
        config.apply_cli_overrides(&cli);

        assert_eq!(config.mode, Some("commands".into()));
        assert_eq!(config.menu.lines, Some(20));
        assert_eq!(config.menu.columns, Some(3));
        assert_eq!(config.menu.fixed_lines, Some(true));
        assert_eq!(config.matching.case_sensitive, Some(true));
        assert_eq!(config.matching.sort, Some(true));
        assert_eq!(config.matching.auto_select, Some(true));
        assert_eq!(config.matching.threads, Some(4));
        assert_eq!(config.apps.directories, cli.app_dirs);
    }

    #[test]
    fn resolve_fills_defaults() {
        let resolved = RawConfig::default().resolve().expect("resolve");
        assert_eq!(resolved.start_mode, StartMode::Apps);
        assert_eq!(resolved.menu.menu_lines, 15);
        assert_eq!(resolved.menu.menu_columns, 1);
        assert_eq!(resolved.menu.scroll, ScrollMethod::Paged);
        assert_eq!(resolved.menu.threads, 0);
        assert!(!resolved.application_dirs.is_empty());
    }

    #[test]
    fn resolve_rejects_zero_lines() {
        let mut raw = RawConfig::default();
        raw.menu.lines = Some(0);
        assert!(raw.resolve().is_err());
    }

    #[test]
    fn resolve_rejects_unknown_mode() {
        let raw = RawConfig {
            mode: Some("files".into()),
            ..RawConfig::default()
        };
        assert!(raw.resolve().is_err());
    }

    #[test]
    fn resolve_rejects_unknown_scroll_method() {
        let mut raw = RawConfig::default();
        raw.menu.scroll = Some("smooth".into());
        assert!(raw.resolve().is_err());
    }
}
