//! View geometry: grid shape and cursor-to-window scroll policies.

use crate::config::MenuConfig;

/// Shape of the visible menu grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
	pub rows: usize,
	pub columns: usize,
	/// Rows times columns; the page size for scrolling.
	pub max_elements: usize,
	/// Display cells available to one element.
	pub element_width: u16,
}

impl Layout {
	/// Compute the grid for a list area of `width` by `height` cells holding
	/// `count` entries. Never returns zero rows or columns, even for
	/// degenerate areas.
	pub fn calculate(config: &MenuConfig, width: u16, height: u16, count: usize) -> Self {
		let columns = (config.menu_columns.max(1)) as usize;
		let limit = (config.menu_lines.max(1)) as usize;
		let fit = (height as usize).min(limit).max(1);

		let rows = if config.fixed_lines {
			fit
		} else {
			fit.min(count.div_ceil(columns)).max(1)
		};

		let element_width = ((width as usize / columns).max(1)) as u16;

		Self {
			rows,
			columns,
			max_elements: rows * columns,
			element_width,
		}
	}
}

/// Page-jump scroll: the window moves a whole page at a time and remembers
/// its position so small cursor moves do not shift it.
pub fn paged_offset(cursor: usize, max_elements: usize, last_offset: &mut usize) -> usize {
	if max_elements == 0 {
		return 0;
	}
	if cursor < *last_offset || cursor >= *last_offset + max_elements {
		*last_offset = (cursor / max_elements) * max_elements;
	}
	*last_offset
}

/// Centered scroll: the cursor sits in the middle of the window except near
/// the ends of the list.
pub fn continuous_offset(cursor: usize, visible: usize, filtered: usize) -> usize {
	if visible == 0 || filtered <= visible {
		return 0;
	}
	let middle = (visible - usize::from(visible % 2 == 0)) / 2;
	if cursor <= middle {
		return 0;
	}
	if cursor + (visible - middle) < filtered {
		cursor - middle
	} else {
		filtered - visible
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn config(lines: u16, columns: u16, fixed: bool) -> MenuConfig {
		MenuConfig {
			menu_lines: lines,
			menu_columns: columns,
			fixed_lines: fixed,
			..MenuConfig::default()
		}
	}

	#[test]
	fn rows_shrink_to_entry_count() {
		let layout = Layout::calculate(&config(15, 1, false), 80, 40, 4);
		assert_eq!(layout.rows, 4);
		assert_eq!(layout.columns, 1);
		assert_eq!(layout.max_elements, 4);
	}

	#[test]
	fn fixed_lines_keep_the_configured_grid() {
		let layout = Layout::calculate(&config(15, 1, true), 80, 40, 4);
		assert_eq!(layout.rows, 15);
		assert_eq!(layout.max_elements, 15);
	}

	#[test]
	fn rows_clip_to_available_height() {
		let layout = Layout::calculate(&config(15, 1, false), 80, 6, 100);
		assert_eq!(layout.rows, 6);
	}

	#[test]
	fn degenerate_area_still_yields_one_by_one() {
		let layout = Layout::calculate(&config(0, 0, false), 0, 0, 0);
		assert_eq!(layout.rows, 1);
		assert_eq!(layout.columns, 1);
		assert!(layout.element_width >= 1);
	}

	#[test]
	fn columns_split_the_width() {
		let layout = Layout::calculate(&config(10, 4, false), 80, 40, 100);
		assert_eq!(layout.columns, 4);
		assert_eq!(layout.element_width, 20);
		assert_eq!(layout.max_elements, 40);
	}

	#[test]
	fn paged_offset_jumps_by_whole_pages() {
		let mut last = 0;
		assert_eq!(paged_offset(3, 10, &mut last), 0);
		assert_eq!(paged_offset(10, 10, &mut last), 10);
		assert_eq!(paged_offset(12, 10, &mut last), 10);
		assert_eq!(paged_offset(25, 10, &mut last), 20);
		assert_eq!(paged_offset(9, 10, &mut last), 0);
	}

	#[test]
	fn continuous_offset_centers_the_cursor() {
		assert_eq!(continuous_offset(0, 5, 20), 0);
		assert_eq!(continuous_offset(2, 5, 20), 0);
		assert_eq!(continuous_offset(3, 5, 20), 1);
		assert_eq!(continuous_offset(10, 5, 20), 8);
	}

	#[test]
	fn continuous_offset_pins_at_the_list_end() {
		assert_eq!(continuous_offset(19, 5, 20), 15);
		assert_eq!(continuous_offset(17, 5, 20), 15);
	}

	#[test]
	fn continuous_offset_handles_short_lists() {
		assert_eq!(continuous_offset(2, 5, 3), 0);
		assert_eq!(continuous_offset(0, 0, 10), 0);
	}
}
