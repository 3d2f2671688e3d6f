use std::fmt::Write;
use std::path::PathBuf;

use clap::{
    ArgAction, ColorChoice, Parser, ValueEnum,
    builder::{
        BoolishValueParser, Styles,
        styling::{AnsiColor, Effects},
    },
};
use sift::app_dirs;

/// Produce the full version banner including config and data directories.
fn long_version() -> &'static str {
    let config_dir = match app_dirs::get_config_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };
    let data_dir = match app_dirs::get_data_dir() {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };

    let mut details = format!("sift {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(details);
    let _ = writeln!(details, "config directory: {config_dir}");
    let _ = writeln!(details, "data directory: {data_dir}");

    Box::leak(details.into_boxed_str())
}

/// Create the clap styles used for custom colour output.
fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into the strongly typed [`CliArgs`] structure.
pub(crate) fn parse_cli() -> CliArgs {
    CliArgs::parse()
}

#[derive(Parser, Debug)]
#[command(
    name = "sift",
    version,
    long_version = long_version(),
    about = "Keyboard-driven selection menu for applications and commands",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
/// Command-line arguments accepted by the `sift` binary.
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "SIFT_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 'm',
        long = "mode",
        value_enum,
        help = "Choose the mode shown first (default: apps)"
    )]
    pub(crate) mode: Option<ModeArg>,
    #[arg(
        short = 'l',
        long = "lines",
        value_name = "NUM",
        help = "Limit the number of visible menu rows (default: 15)"
    )]
    pub(crate) lines: Option<u16>,
    #[arg(
        long = "columns",
        value_name = "NUM",
        help = "Lay the menu out over this many columns (default: 1)"
    )]
    pub(crate) columns: Option<u16>,
    #[arg(
        long = "fixed-lines",
        value_parser = BoolishValueParser::new(),
        value_name = "BOOL",
        help = "Keep the menu height fixed even with few entries (default: disabled)"
    )]
    pub(crate) fixed_lines: Option<bool>,
    #[arg(
        long = "scroll",
        value_enum,
        help = "Choose how the menu scrolls through long lists (default: paged)"
    )]
    pub(crate) scroll: Option<ScrollArg>,
    #[arg(
        short = 'C',
        long = "case-sensitive",
        value_parser = BoolishValueParser::new(),
        value_name = "BOOL",
        help = "Match the query without case folding (default: disabled)"
    )]
    pub(crate) case_sensitive: Option<bool>,
    #[arg(
        short = 's',
        long = "sort",
        value_parser = BoolishValueParser::new(),
        value_name = "BOOL",
        help = "Rank matches by edit distance to the query (default: disabled)"
    )]
    pub(crate) sort: Option<bool>,
    #[arg(
        short = 'a',
        long = "auto-select",
        value_parser = BoolishValueParser::new(),
        value_name = "BOOL",
        help = "Accept automatically when one match remains (default: disabled)"
    )]
    pub(crate) auto_select: Option<bool>,
    #[arg(
        short = 'j',
        long,
        value_name = "NUM",
        help = "Limit the number of filter threads (default: automatic)"
    )]
    pub(crate) threads: Option<usize>,
    #[arg(
        long = "app-dirs",
        value_delimiter = ',',
        value_name = "DIR",
        help = "Comma-separated directories to scan for desktop entries (default: XDG data directories)"
    )]
    pub(crate) app_dirs: Option<Vec<PathBuf>>,
    #[arg(
        short = 'p',
        long = "print-config",
        help = "Print the resolved configuration before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Plain, help = "Choose how to print the result")]
    pub(crate) output: OutputFormat,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
/// Menu modes selectable via the command line.
pub(crate) enum ModeArg {
    Apps,
    Commands,
}

impl ModeArg {
    /// Return the string representation consumed by configuration loading.
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ModeArg::Apps => "apps",
            ModeArg::Commands => "commands",
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
/// Scroll behaviours selectable via the command line.
pub(crate) enum ScrollArg {
    Paged,
    Continuous,
}

impl ScrollArg {
    /// Return the string representation consumed by configuration loading.
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ScrollArg::Paged => "paged",
            ScrollArg::Continuous => "continuous",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
/// Output formats supported by the binary.
pub(crate) enum OutputFormat {
    Plain,
    Json,
}
