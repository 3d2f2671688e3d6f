/// How the visible window follows the cursor through the filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollMethod {
	/// Jump a whole page at a time; the cursor stays inside the page.
	#[default]
	Paged,
	/// Keep the cursor centered except near the ends of the list.
	Continuous,
}

/// Behavior knobs for one menu session.
#[derive(Debug, Clone)]
pub struct MenuConfig {
	/// Match and rank queries without case folding.
	pub case_sensitive: bool,
	/// Rank filtered entries by edit distance to the query.
	pub sort_by_distance: bool,
	/// Accept immediately when exactly one candidate remains out of an
	/// originally plural entry set.
	pub auto_select: bool,
	/// Upper bound on visible menu rows.
	pub menu_lines: u16,
	/// Number of menu columns.
	pub menu_columns: u16,
	/// Keep the configured number of rows even when fewer entries exist.
	pub fixed_lines: bool,
	pub scroll: ScrollMethod,
	/// Filter worker threads; `0` means detect the processor count.
	pub threads: usize,
}

impl Default for MenuConfig {
	fn default() -> Self {
		Self {
			case_sensitive: false,
			sort_by_distance: false,
			auto_select: false,
			menu_lines: 15,
			menu_columns: 1,
			fixed_lines: false,
			scroll: ScrollMethod::Paged,
			threads: 0,
		}
	}
}
