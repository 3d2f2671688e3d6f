//! Per-session menu state: filtered map, cursor, layout and pending outcome.

use std::sync::Arc;

use anyhow::Result;
use sift_mode_api::{MenuOutcome, Mode, ModeSwitch};

use crate::config::{MenuConfig, ScrollMethod};
use crate::filter::FilterEngine;
use crate::geometry::{self, Layout};
use crate::input::QueryInput;
use crate::nav;

/// All mutable state of one menu invocation.
///
/// Created when a mode is shown and dropped when the session ends in an
/// outcome. The filtered map and distance table are owned here and replaced
/// wholesale by each refilter pass.
pub struct MenuState {
	mode: Arc<dyn Mode>,
	config: MenuConfig,
	pub(crate) input: QueryInput,
	ascii: Arc<Vec<bool>>,
	filtered: Vec<usize>,
	pub(crate) layout: Layout,
	cursor: usize,
	last_offset: usize,
	refilter: bool,
	update: bool,
	outcome: Option<MenuOutcome>,
}

impl MenuState {
	/// Build the session state for `mode`, precomputing the ASCII table and
	/// running the initial (empty-query) filter pass.
	pub fn new(mode: Arc<dyn Mode>, config: MenuConfig, engine: &FilterEngine) -> Result<Self> {
		let ascii = Arc::new(engine.ascii_table(&mode)?);
		let layout = Layout::calculate(&config, 80, config.menu_lines, mode.count());

		let mut state = Self {
			mode,
			config,
			input: QueryInput::default(),
			ascii,
			filtered: Vec::new(),
			layout,
			cursor: 0,
			last_offset: 0,
			refilter: true,
			update: true,
			outcome: None,
		};
		state.refilter(engine)?;
		Ok(state)
	}

	pub fn mode(&self) -> &dyn Mode {
		self.mode.as_ref()
	}

	pub fn filtered_count(&self) -> usize {
		self.filtered.len()
	}

	pub fn cursor(&self) -> usize {
		self.cursor
	}

	/// Entry index under the cursor, when any entry is visible.
	pub fn selected_entry(&self) -> Option<usize> {
		self.filtered.get(self.cursor).copied()
	}

	pub fn query(&self) -> &str {
		self.input.text()
	}

	pub fn needs_refilter(&self) -> bool {
		self.refilter
	}

	pub fn take_outcome(&mut self) -> Option<MenuOutcome> {
		self.outcome.take()
	}

	/// Whether the menu needs redrawing, clearing the flag.
	pub fn take_update(&mut self) -> bool {
		std::mem::take(&mut self.update)
	}

	pub fn mark_update(&mut self) {
		self.update = true;
	}

	/// Rebuild the filtered map for the current query, clamp the cursor into
	/// the new map and fire auto-accept when it applies.
	pub fn refilter(&mut self, engine: &FilterEngine) -> Result<()> {
		let result = engine.refilter(
			&self.mode,
			self.input.text(),
			&self.ascii,
			self.config.case_sensitive,
			self.config.sort_by_distance,
		)?;
		self.filtered = result.map;

		self.cursor = if self.filtered.is_empty() {
			0
		} else {
			self.cursor.min(self.filtered.len() - 1)
		};

		if self.config.auto_select && self.filtered.len() == 1 && self.mode.count() > 1 {
			self.outcome = Some(MenuOutcome::Accept {
				index: self.filtered[0],
				alternate: false,
			});
		}

		self.refilter = false;
		self.update = true;
		Ok(())
	}

	/// Recompute the grid for the current list area.
	pub(crate) fn update_layout(&mut self, width: u16, height: u16) {
		let layout = Layout::calculate(&self.config, width, height, self.mode.count());
		if layout != self.layout {
			self.layout = layout;
			self.update = true;
		}
	}

	/// Offset of the visible window plus the entry indices inside it.
	pub(crate) fn visible_window(&mut self) -> (usize, &[usize]) {
		let max = self.layout.max_elements;
		let offset = match self.config.scroll {
			ScrollMethod::Paged => geometry::paged_offset(self.cursor, max, &mut self.last_offset),
			ScrollMethod::Continuous => {
				geometry::continuous_offset(self.cursor, max, self.filtered.len())
			}
		};
		let start = offset.min(self.filtered.len());
		let end = (offset + max).min(self.filtered.len());
		(start, &self.filtered[start..end])
	}

	/// Short indicator for the status line showing the active matching
	/// options.
	pub(crate) fn matching_state(&self) -> String {
		let case = if self.config.case_sensitive { 'C' } else { '-' };
		let sort = if self.config.sort_by_distance { 'S' } else { '-' };
		format!("[{case}{sort}]")
	}

	pub(crate) fn move_up(&mut self) {
		self.cursor = nav::up(self.cursor, self.filtered.len());
		self.update = true;
	}

	pub(crate) fn move_down(&mut self) {
		self.cursor = nav::down(self.cursor, self.filtered.len());
		self.update = true;
	}

	pub(crate) fn move_left(&mut self) {
		self.cursor = nav::left(self.cursor, self.layout.rows);
		self.update = true;
	}

	pub(crate) fn move_right(&mut self) {
		self.cursor = nav::right(self.cursor, self.filtered.len(), self.layout.rows);
		self.update = true;
	}

	pub(crate) fn page_back(&mut self) {
		self.cursor = nav::page_back(self.cursor, self.layout.max_elements);
		self.update = true;
	}

	pub(crate) fn page_forward(&mut self) {
		self.cursor = nav::page_forward(self.cursor, self.filtered.len(), self.layout.max_elements);
		self.update = true;
	}

	pub(crate) fn go_first(&mut self) {
		self.cursor = nav::first();
		self.update = true;
	}

	pub(crate) fn go_last(&mut self) {
		self.cursor = nav::last(self.filtered.len());
		self.update = true;
	}

	pub(crate) fn toggle_case_sensitivity(&mut self) {
		self.config.case_sensitive = !self.config.case_sensitive;
		self.mark_refilter();
	}

	pub(crate) fn toggle_sort(&mut self) {
		self.config.sort_by_distance = !self.config.sort_by_distance;
		self.mark_refilter();
	}

	pub(crate) fn insert_char(&mut self, ch: char) {
		self.input.insert(ch);
		self.mark_refilter();
	}

	pub(crate) fn query_changed(&mut self, changed: bool) {
		if changed {
			self.mark_refilter();
		} else {
			self.update = true;
		}
	}

	/// Accept the entry under the cursor, or the raw query when nothing
	/// matched and text was typed.
	pub(crate) fn accept(&mut self, alternate: bool) {
		if let Some(index) = self.selected_entry() {
			self.outcome = Some(MenuOutcome::Accept { index, alternate });
		} else if !self.input.is_empty() {
			self.outcome = Some(MenuOutcome::CustomInput {
				text: self.input.text().to_string(),
				alternate,
			});
		}
	}

	pub(crate) fn cancel(&mut self) {
		self.outcome = Some(MenuOutcome::Cancel);
	}

	pub(crate) fn delete_selected(&mut self) {
		if let Some(index) = self.selected_entry() {
			self.outcome = Some(MenuOutcome::DeleteEntry { index });
		}
	}

	pub(crate) fn switch_mode(&mut self, direction: ModeSwitch) {
		self.outcome = Some(MenuOutcome::SwitchMode(direction));
	}

	fn mark_refilter(&mut self) {
		self.refilter = true;
		self.update = true;
	}
}

#[cfg(test)]
mod tests {
	use anyhow::Result as AnyResult;
	use sift_mode_api::{ModeEvent, Selection, token_match};

	use super::*;

	struct ListMode {
		entries: Vec<String>,
	}

	impl ListMode {
		fn shared(entries: &[&str]) -> Arc<dyn Mode> {
			Arc::new(Self {
				entries: entries.iter().map(|entry| entry.to_string()).collect(),
			})
		}
	}

	impl Mode for ListMode {
		fn name(&self) -> &str {
			"list"
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

		fn handle_result(&self, _outcome: &MenuOutcome) -> AnyResult<ModeEvent> {
			Ok(ModeEvent::Done(Selection {
				mode: self.name().to_string(),
				value: String::new(),
				alternate: false,
			}))
		}
	}

	fn sample_state(config: MenuConfig) -> (MenuState, FilterEngine) {
		let engine = FilterEngine::new(1).expect("engine");
		let mode = ListMode::shared(&["alpha", "beta", "gamma", "delta", "alphabet"]);
		let state = MenuState::new(mode, config, &engine).expect("state");
		(state, engine)
	}

	fn type_query(state: &mut MenuState, engine: &FilterEngine, query: &str) {
		for ch in query.chars() {
			state.insert_char(ch);
		}
		state.refilter(engine).expect("refilter");
	}

	#[test]
	fn initial_state_shows_every_entry() {
		let (state, _engine) = sample_state(MenuConfig::default());
		assert_eq!(state.filtered_count(), 5);
		assert_eq!(state.cursor(), 0);
	}

	#[test]
	fn cursor_clamps_when_the_filtered_set_shrinks() {
		let (mut state, engine) = sample_state(MenuConfig::default());
		state.go_last();
		assert_eq!(state.cursor(), 4);

		type_query(&mut state, &engine, "alp");
		assert_eq!(state.filtered_count(), 2);
		assert_eq!(state.cursor(), 1);
	}

	#[test]
	fn cursor_resets_when_nothing_matches() {
		let (mut state, engine) = sample_state(MenuConfig::default());
		state.go_last();
		type_query(&mut state, &engine, "zzz");
		assert_eq!(state.filtered_count(), 0);
		assert_eq!(state.cursor(), 0);
		assert_eq!(state.selected_entry(), None);
	}

	#[test]
	fn auto_select_fires_when_one_of_many_remains() {
		let config = MenuConfig {
			auto_select: true,
			..MenuConfig::default()
		};
		let (mut state, engine) = sample_state(config);
		type_query(&mut state, &engine, "alphab");
		assert_eq!(
			state.take_outcome(),
			Some(MenuOutcome::Accept {
				index: 4,
				alternate: false
			})
		);
	}

	#[test]
	fn auto_select_stays_quiet_without_the_option() {
		let (mut state, engine) = sample_state(MenuConfig::default());
		type_query(&mut state, &engine, "alphab");
		assert_eq!(state.filtered_count(), 1);
		assert_eq!(state.take_outcome(), None);
	}

	#[test]
	fn accept_prefers_the_selection_over_free_text() {
		let (mut state, engine) = sample_state(MenuConfig::default());
		type_query(&mut state, &engine, "beta");
		state.accept(false);
		assert_eq!(
			state.take_outcome(),
			Some(MenuOutcome::Accept {
				index: 1,
				alternate: false
			})
		);
	}

	#[test]
	fn accept_falls_back_to_the_raw_query() {
		let (mut state, engine) = sample_state(MenuConfig::default());
		type_query(&mut state, &engine, "no such entry");
		state.accept(true);
		assert_eq!(
			state.take_outcome(),
			Some(MenuOutcome::CustomInput {
				text: "no such entry".to_string(),
				alternate: true
			})
		);
	}

	#[test]
	fn toggles_mark_the_state_for_refiltering() {
		let (mut state, _engine) = sample_state(MenuConfig::default());
		assert!(!state.needs_refilter());
		state.toggle_sort();
		assert!(state.needs_refilter());
		assert_eq!(state.matching_state(), "[-S]");
		state.toggle_case_sensitivity();
		assert_eq!(state.matching_state(), "[CS]");
	}

	#[test]
	fn visible_window_tracks_the_cursor_page() {
		let engine = FilterEngine::new(1).expect("engine");
		let entries: Vec<String> = (0..30).map(|i| format!("item-{i:02}")).collect();
		let refs: Vec<&str> = entries.iter().map(|entry| entry.as_str()).collect();
		let mode = ListMode::shared(&refs);
		let config = MenuConfig {
			menu_lines: 10,
			..MenuConfig::default()
		};
		let mut state = MenuState::new(mode, config, &engine).expect("state");
		state.update_layout(40, 10);

		let (offset, window) = state.visible_window();
		assert_eq!(offset, 0);
		assert_eq!(window.len(), 10);

		for _ in 0..12 {
			state.move_down();
		}
		let (offset, window) = state.visible_window();
		assert_eq!(offset, 10);
		assert_eq!(window, (10..20).collect::<Vec<_>>().as_slice());
	}
}
