//! Terminal rendering for one menu frame.
//!
//! The renderer only ever sees the visible window of the filtered map, never
//! the whole thing: the grid is drawn column-major from the window slice the
//! session state hands out.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::state::MenuState;

const PROMPT: &str = "> ";

impl MenuState {
	pub(crate) fn draw(&mut self, frame: &mut Frame) {
		let [input_area, list_area, status_area] = Layout::vertical([
			Constraint::Length(1),
			Constraint::Min(1),
			Constraint::Length(1),
		])
		.areas(frame.area());

		self.update_layout(list_area.width, list_area.height);

		self.draw_input(frame, input_area);
		self.draw_grid(frame, list_area);
		self.draw_status(frame, status_area);
	}

	fn draw_input(&self, frame: &mut Frame, area: Rect) {
		let line = Line::from(vec![
			Span::styled(PROMPT, Style::new().add_modifier(Modifier::BOLD)),
			Span::raw(self.input.text()),
		]);
		frame.render_widget(Paragraph::new(line), area);

		let caret_cells = self.input.text()[..self.input.caret()].width() as u16;
		let x = (area.x + PROMPT.width() as u16 + caret_cells).min(area.right().saturating_sub(1));
		frame.set_cursor_position(Position::new(x, area.y));
	}

	fn draw_grid(&mut self, frame: &mut Frame, area: Rect) {
		let rows = self.layout.rows;
		let element_width = self.layout.element_width;
		let cursor = self.cursor();
		let (offset, window) = self.visible_window();
		let window = window.to_vec();

		for (slot, entry) in window.into_iter().enumerate() {
			let column = (slot / rows) as u16;
			let row = (slot % rows) as u16;
			let x = area.x + column * element_width;
			let y = area.y + row;
			if y >= area.bottom() || x >= area.right() {
				continue;
			}

			let cell = Rect {
				x,
				y,
				width: element_width.min(area.right() - x),
				height: 1,
			};
			let text = truncate_to_width(&self.mode().display_text(entry), cell.width as usize);
			let style = if offset + slot == cursor {
				Style::new().add_modifier(Modifier::REVERSED)
			} else {
				Style::new()
			};
			frame.render_widget(Paragraph::new(text).style(style), cell);
		}
	}

	fn draw_status(&self, frame: &mut Frame, area: Rect) {
		let status = format!(
			"{} {}/{} {}",
			self.mode().name(),
			self.filtered_count(),
			self.mode().count(),
			self.matching_state()
		);
		let widget = Paragraph::new(status).style(Style::new().add_modifier(Modifier::DIM));
		frame.render_widget(widget, area);
	}
}

/// Cut `text` down to at most `width` display cells.
fn truncate_to_width(text: &str, width: usize) -> String {
	let mut used = 0;
	let mut out = String::new();
	for ch in text.chars() {
		let cells = ch.width().unwrap_or(0);
		if used + cells > width {
			break;
		}
		used += cells;
		out.push(ch);
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn truncation_respects_display_width() {
		assert_eq!(truncate_to_width("terminal", 4), "term");
		assert_eq!(truncate_to_width("ab", 4), "ab");
		assert_eq!(truncate_to_width("", 4), "");
	}

	#[test]
	fn truncation_counts_wide_chars_as_two_cells() {
		assert_eq!(truncate_to_width("日本語", 4), "日本");
		assert_eq!(truncate_to_width("日本語", 5), "日本");
	}
}
