use anyhow::Result;
use serde_json::json;

use crate::session::SessionOutcome;

/// Print a plain-text representation of the session outcome.
pub(crate) fn print_plain(outcome: &SessionOutcome) {
	if !outcome.accepted {
		println!("Selection cancelled");
		return;
	}

	match &outcome.selection {
		Some(selection) => println!("{}", selection.value),
		None => println!("No selection"),
	}
}

/// Format the session outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &SessionOutcome) -> Result<String> {
	let selection = match &outcome.selection {
		Some(selection) => json!({
			"mode": selection.mode,
			"value": selection.value,
			"alternate": selection.alternate,
		}),
		None => serde_json::Value::Null,
	};

	let payload = json!({
		"accepted": outcome.accepted,
		"selection": selection,
	});

	Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the session outcome.
pub(crate) fn print_json(outcome: &SessionOutcome) -> Result<()> {
	println!("{}", format_outcome_json(outcome)?);
	Ok(())
}
