//! Cursor transitions over the filtered list.
//!
//! All functions are pure: they take the current cursor plus the relevant
//! dimensions and return the new cursor. The grid is column-major, so a
//! column step moves by the row count.

/// Move up one row, wrapping from the first entry to the last.
pub fn up(cursor: usize, filtered: usize) -> usize {
	if filtered == 0 {
		return 0;
	}
	if cursor == 0 { filtered - 1 } else { cursor - 1 }
}

/// Move down one row, wrapping from the last entry to the first.
pub fn down(cursor: usize, filtered: usize) -> usize {
	if filtered == 0 {
		return 0;
	}
	(cursor + 1) % filtered
}

/// Move one column left. No wrap: the first column absorbs the move.
pub fn left(cursor: usize, rows: usize) -> usize {
	if cursor >= rows { cursor - rows } else { cursor }
}

/// Move one column right. No wrap, but when the final column is shorter than
/// the others the cursor snaps to the last entry instead of staying put.
pub fn right(cursor: usize, filtered: usize, rows: usize) -> usize {
	if filtered == 0 || rows == 0 {
		return cursor;
	}
	if cursor + rows < filtered {
		return cursor + rows;
	}
	if cursor + 1 < filtered {
		let column = cursor / rows;
		let last_column = filtered / rows;
		if column != last_column {
			return filtered - 1;
		}
	}
	cursor
}

/// Move back one page, stopping at the first entry.
pub fn page_back(cursor: usize, page: usize) -> usize {
	cursor.saturating_sub(page)
}

/// Move forward one page, stopping at the last entry.
pub fn page_forward(cursor: usize, filtered: usize, page: usize) -> usize {
	if filtered == 0 {
		return 0;
	}
	(cursor + page).min(filtered - 1)
}

/// Jump to the first entry.
pub fn first() -> usize {
	0
}

/// Jump to the last entry.
pub fn last(filtered: usize) -> usize {
	filtered.saturating_sub(1)
}
