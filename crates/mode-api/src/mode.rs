use anyhow::Result;

use crate::outcome::{MenuOutcome, Selection};

/// What the session driver should do after a mode has consumed an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeEvent {
    /// The session is finished; hand the selection to the caller.
    Done(Selection),
    /// The mode's entry set changed; rebuild it and show the menu again.
    Reload,
}

/// An entry source driving one menu session.
///
/// A mode owns its entries for the lifetime of a session and addresses them
/// by a stable zero-based index. All read accessors take `&self` so the
/// filter engine can share the mode across its worker threads.
pub trait Mode: Send + Sync {
    /// Short name shown in the status line and reported in the outcome.
    fn name(&self) -> &str;

    /// Number of entries currently offered.
    fn count(&self) -> usize;

    /// Text rendered for the entry in the menu grid.
    fn display_text(&self, index: usize) -> String;

    /// Text used for distance ranking and for the accepted output value.
    fn completion_text(&self, index: usize) -> String;

    /// Whether all searchable fields of the entry are plain ASCII. The
    /// engine precomputes this once per session so matching can take the
    /// byte-comparison fast path.
    fn is_ascii(&self, index: usize) -> bool;

    /// Whether the entry matches a tokenized query. Modes decide which
    /// fields are searchable.
    fn token_match(
        &self,
        tokens: &[String],
        ascii: bool,
        case_sensitive: bool,
        index: usize,
    ) -> bool;

    /// React to a finished menu round: record history, delete entries,
    /// produce the final selection.
    fn handle_result(&self, outcome: &MenuOutcome) -> Result<ModeEvent>;
}
