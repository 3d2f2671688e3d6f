mod cli;
mod session;
mod settings;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use session::MenuSession;
use settings::ResolvedConfig;

fn main() -> Result<()> {
	let cli = parse_cli();
	sift::logging::init();

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	run_menu(cli.output, resolved)
}

/// Run one menu session and print the outcome in the chosen format.
fn run_menu(format: OutputFormat, settings: ResolvedConfig) -> Result<()> {
	let session = MenuSession::from_config(settings)?;
	let outcome = session.run()?;

	match format {
		OutputFormat::Plain => print_plain(&outcome),
		OutputFormat::Json => print_json(&outcome)?,
	}

	Ok(())
}
