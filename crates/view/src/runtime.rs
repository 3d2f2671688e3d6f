//! Menu session event loop.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use sift_mode_api::{MenuOutcome, Mode};

use crate::config::MenuConfig;
use crate::filter::FilterEngine;
use crate::state::MenuState;

/// Show `mode` as an interactive menu and block until the user produces an
/// outcome.
///
/// The interactive path is single-threaded: each refilter runs to completion
/// before the next event is read, so exactly one filter pass is ever in
/// flight.
pub fn run(mode: Arc<dyn Mode>, config: MenuConfig, engine: &FilterEngine) -> Result<MenuOutcome> {
	let mut state = MenuState::new(mode, config, engine)?;
	let mut terminal = ratatui::init();
	let result = session_loop(&mut terminal, &mut state, engine);
	ratatui::restore();
	result
}

fn session_loop(
	terminal: &mut DefaultTerminal,
	state: &mut MenuState,
	engine: &FilterEngine,
) -> Result<MenuOutcome> {
	terminal.clear()?;

	loop {
		if state.needs_refilter() {
			state.refilter(engine)?;
		}
		if let Some(outcome) = state.take_outcome() {
			return Ok(outcome);
		}
		if state.take_update() {
			terminal.draw(|frame| state.draw(frame))?;
		}

		if event::poll(Duration::from_millis(50))? {
			match event::read()? {
				Event::Key(key) if key.kind == KeyEventKind::Press => state.handle_key(key),
				Event::Resize(_, _) => state.mark_update(),
				_ => {}
			}
		}
	}
}
