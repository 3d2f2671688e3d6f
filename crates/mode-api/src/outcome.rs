/// How a menu session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    /// The user accepted the entry under the cursor.
    Accept { index: usize, alternate: bool },
    /// The user accepted the raw query text with no entry selected.
    CustomInput { text: String, alternate: bool },
    /// The user asked to remove the entry under the cursor from its source.
    DeleteEntry { index: usize },
    /// The user asked to move to another mode.
    SwitchMode(ModeSwitch),
    /// The user dismissed the menu without choosing anything.
    Cancel,
}

/// Direction of an in-session mode switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSwitch {
    Next,
    Previous,
}

/// The value a finished session hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Name of the mode that produced the value.
    pub mode: String,
    /// The accepted entry's completion text, or the raw query for free-text
    /// accepts.
    pub value: String,
    /// Set when the accept carried the alternate modifier.
    pub alternate: bool,
}
