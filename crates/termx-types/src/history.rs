//! Session history entries: what the console renders, in order.

/// One rendered line group in the session history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEntry {
    /// Echo of a submitted line and the path it was typed at.
    Input { raw: String, path: String },
    /// Output produced by a command.
    Output { content: String },
}

impl HistoryEntry {
    /// Create an input echo entry.
    pub fn input(raw: impl Into<String>, path: impl Into<String>) -> Self {
        HistoryEntry::Input {
            raw: raw.into(),
            path: path.into(),
        }
    }

    /// Create an output entry.
    pub fn output(content: impl Into<String>) -> Self {
        HistoryEntry::Output {
            content: content.into(),
        }
    }

    /// Output content, if this is an output entry.
    pub fn as_output(&self) -> Option<&str> {
        match self {
            HistoryEntry::Output { content } => Some(content),
            HistoryEntry::Input { .. } => None,
        }
    }
}
