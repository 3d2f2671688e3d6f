use std::path::PathBuf;

use sift_view::{MenuConfig, ScrollMethod};

/// Menu mode shown when a session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartMode {
    Apps,
    Commands,
}

impl StartMode {
    /// Return the mode name as it appears in configuration and output.
    pub fn as_str(self) -> &'static str {
        match self {
            StartMode::Apps => "apps",
            StartMode::Commands => "commands",
        }
    }
}

/// Application-ready configuration derived from user input, config files and
/// sensible defaults.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub start_mode: StartMode,
    pub menu: MenuConfig,
    pub application_dirs: Vec<PathBuf>,
}

impl ResolvedConfig {
    /// Print a human readable summary of the effective configuration.
    pub fn print_summary(&self) {
        println!("Effective configuration:");
        println!("  Start mode: {}", self.start_mode.as_str());
        println!("  Lines: {}", self.menu.menu_lines);
        println!("  Columns: {}", self.menu.menu_columns);
        println!("  Fixed lines: {}", bool_to_word(self.menu.fixed_lines));
        println!(
            "  Scroll: {}",
            match self.menu.scroll {
                ScrollMethod::Paged => "paged",
                ScrollMethod::Continuous => "continuous",
            }
        );
        println!(
            "  Case sensitive: {}",
            bool_to_word(self.menu.case_sensitive)
        );
        println!(
            "  Sort by distance: {}",
            bool_to_word(self.menu.sort_by_distance)
        );
        println!("  Auto select: {}", bool_to_word(self.menu.auto_select));
        match self.menu.threads {
            0 => println!("  Threads: automatic"),
            threads => println!("  Threads: {threads}"),
        }
        println!(
            "  Application directories: {}",
            self.application_dirs
                .iter()
                .map(|dir| dir.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
}

fn bool_to_word(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_to_word_matches_expectations() {
        assert_eq!(super::bool_to_word(true), "yes");
        assert_eq!(super::bool_to_word(false), "no");
    }

    #[test]
    fn summary_prints_without_panic() {
        let config = ResolvedConfig {
            start_mode: StartMode::Apps,
            menu: MenuConfig::default(),
            application_dirs: vec![PathBuf::from("/usr/share/applications")],
        };

        config.print_summary();
    }
}
