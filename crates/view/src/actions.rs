use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use sift_mode_api::ModeSwitch;

use crate::state::MenuState;

impl MenuState {
	/// Process a keyboard event, updating the session state and possibly
	/// setting the pending outcome.
	pub(crate) fn handle_key(&mut self, key: KeyEvent) {
		let shift = key.modifiers.contains(KeyModifiers::SHIFT);
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

		match key.code {
			KeyCode::Esc => self.cancel(),
			KeyCode::Enter => self.accept(shift),
			KeyCode::Tab => self.switch_mode(ModeSwitch::Next),
			KeyCode::BackTab => self.switch_mode(ModeSwitch::Previous),
			KeyCode::Up => self.move_up(),
			KeyCode::Down => self.move_down(),
			KeyCode::Left if shift => self.move_left(),
			KeyCode::Right if shift => self.move_right(),
			KeyCode::PageUp => self.page_back(),
			KeyCode::PageDown => self.page_forward(),
			KeyCode::Home if ctrl => self.go_first(),
			KeyCode::End if ctrl => self.go_last(),
			KeyCode::Delete if shift => self.delete_selected(),
			KeyCode::Left => {
				self.input.move_left();
				self.query_changed(false);
			}
			KeyCode::Right => {
				self.input.move_right();
				self.query_changed(false);
			}
			KeyCode::Home => {
				self.input.move_home();
				self.query_changed(false);
			}
			KeyCode::End => {
				self.input.move_end();
				self.query_changed(false);
			}
			KeyCode::Backspace => {
				let changed = self.input.backspace();
				self.query_changed(changed);
			}
			KeyCode::Delete => {
				let changed = self.input.delete();
				self.query_changed(changed);
			}
			KeyCode::Char('s') if ctrl => self.toggle_sort(),
			KeyCode::Char('t') if ctrl => self.toggle_case_sensitivity(),
			KeyCode::Char('u') if ctrl => {
				let changed = self.input.clear();
				self.query_changed(changed);
			}
			KeyCode::Char('w') if ctrl => {
				let changed = self.input.remove_word();
				self.query_changed(changed);
			}
			KeyCode::Char(ch) if !ctrl => self.insert_char(ch),
			_ => {}
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use anyhow::Result as AnyResult;
	use sift_mode_api::{MenuOutcome, Mode, ModeEvent, Selection, token_match};

	use super::*;
	use crate::config::MenuConfig;
	use crate::filter::FilterEngine;

	struct ListMode {
		entries: Vec<String>,
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

	fn state_with(entries: &[&str]) -> (MenuState, FilterEngine) {
		let engine = FilterEngine::new(1).expect("engine");
		let mode: Arc<dyn Mode> = Arc::new(ListMode {
			entries: entries.iter().map(|entry| entry.to_string()).collect(),
		});
		let state = MenuState::new(mode, MenuConfig::default(), &engine).expect("state");
		(state, engine)
	}

	fn press(code: KeyCode) -> KeyEvent {
		KeyEvent::new(code, KeyModifiers::NONE)
	}

	fn press_with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
		KeyEvent::new(code, modifiers)
	}

	#[test]
	fn escape_cancels_the_session() {
		let (mut state, _engine) = state_with(&["one", "two"]);
		state.handle_key(press(KeyCode::Esc));
		assert_eq!(state.take_outcome(), Some(MenuOutcome::Cancel));
	}

	#[test]
	fn enter_accepts_the_cursor_entry() {
		let (mut state, _engine) = state_with(&["one", "two"]);
		state.handle_key(press(KeyCode::Down));
		state.handle_key(press(KeyCode::Enter));
		assert_eq!(
			state.take_outcome(),
			Some(MenuOutcome::Accept {
				index: 1,
				alternate: false
			})
		);
	}

	#[test]
	fn shift_enter_sets_the_alternate_flag() {
		let (mut state, _engine) = state_with(&["one"]);
		state.handle_key(press_with(KeyCode::Enter, KeyModifiers::SHIFT));
		assert_eq!(
			state.take_outcome(),
			Some(MenuOutcome::Accept {
				index: 0,
				alternate: true
			})
		);
	}

	#[test]
	fn tab_cycles_modes() {
		let (mut state, _engine) = state_with(&["one"]);
		state.handle_key(press(KeyCode::Tab));
		assert_eq!(
			state.take_outcome(),
			Some(MenuOutcome::SwitchMode(ModeSwitch::Next))
		);
		state.handle_key(press(KeyCode::BackTab));
		assert_eq!(
			state.take_outcome(),
			Some(MenuOutcome::SwitchMode(ModeSwitch::Previous))
		);
	}

	#[test]
	fn shift_delete_requests_entry_deletion() {
		let (mut state, _engine) = state_with(&["one", "two"]);
		state.handle_key(press_with(KeyCode::Delete, KeyModifiers::SHIFT));
		assert_eq!(
			state.take_outcome(),
			Some(MenuOutcome::DeleteEntry { index: 0 })
		);
	}

	#[test]
	fn typing_marks_the_state_for_refiltering() {
		let (mut state, _engine) = state_with(&["one", "two"]);
		assert!(!state.needs_refilter());
		state.handle_key(press(KeyCode::Char('o')));
		assert!(state.needs_refilter());
		assert_eq!(state.query(), "o");
	}

	#[test]
	fn caret_moves_do_not_trigger_a_refilter() {
		let (mut state, _engine) = state_with(&["one"]);
		state.handle_key(press(KeyCode::Left));
		state.handle_key(press(KeyCode::Home));
		assert!(!state.needs_refilter());
	}

	#[test]
	fn backspace_on_empty_input_changes_nothing() {
		let (mut state, _engine) = state_with(&["one"]);
		state.handle_key(press(KeyCode::Backspace));
		assert!(!state.needs_refilter());
	}
}
