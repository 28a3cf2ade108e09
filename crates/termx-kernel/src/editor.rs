//! Input line editing: buffer, command recall, tab completion.

use indexmap::IndexMap;

use crate::session::Session;

/// A key press, already decoded from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Up,
    Down,
    Enter,
    Tab,
    Other,
}

/// What a Tab press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Nothing matched, or there was nothing to complete.
    None,
    /// The last word was replaced by the only match.
    Replaced,
    /// Several matches were listed as an output entry.
    Listed,
}

/// The line being typed.
///
/// Recall state (`command_log`, `history_cursor`) lives on the [`Session`];
/// the editor only owns the buffer.
#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    buffer: String,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn set_buffer(&mut self, s: impl Into<String>) {
        self.buffer = s.into();
    }

    pub fn insert(&mut self, c: char) {
        self.buffer.push(c);
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Up: recall the previous logged command, stopping at the oldest.
    pub fn history_up(&mut self, session: &mut Session) {
        let Some(last) = session.command_log.len().checked_sub(1) else {
            return;
        };
        let index = match session.history_cursor {
            None => last,
            Some(i) => i.saturating_sub(1),
        };
        session.history_cursor = Some(index);
        self.buffer = session.command_log[index].clone();
    }

    /// Down: recall the next logged command; past the newest, clear the
    /// line and leave recall.
    pub fn history_down(&mut self, session: &mut Session) {
        let Some(i) = session.history_cursor else {
            return;
        };
        if i + 1 < session.command_log.len() {
            session.history_cursor = Some(i + 1);
            self.buffer = session.command_log[i + 1].clone();
        } else {
            session.history_cursor = None;
            self.buffer.clear();
        }
    }

    /// Finish the line after it has been submitted: log it (trimmed, if not
    /// blank), leave recall and clear the buffer.
    pub fn commit(&mut self, session: &mut Session) {
        let line = self.buffer.trim();
        if !line.is_empty() {
            session.command_log.push(line.to_string());
        }
        session.history_cursor = None;
        self.buffer.clear();
    }

    /// Tab: complete the last word of the buffer.
    ///
    /// For the first word the candidates are `verbs` and the entries of the
    /// current directory; for later words only the entries. A single
    /// matching directory wins outright. Directories complete with a
    /// trailing `/`.
    pub fn complete(&mut self, session: &mut Session, verbs: &[String]) -> Completion {
        let split = self
            .buffer
            .rfind(char::is_whitespace)
            .map(|i| i + 1)
            .unwrap_or(0);
        let (head, word) = self.buffer.split_at(split);
        if word.is_empty() {
            return Completion::None;
        }

        let entries = session
            .fs
            .list_directory(&session.cwd)
            .unwrap_or_default();

        let dirs: Vec<_> = entries
            .iter()
            .filter(|e| e.is_dir() && e.name.starts_with(word))
            .collect();

        // name -> is_dir
        let mut matches: IndexMap<String, bool> = IndexMap::new();
        if let [dir] = dirs.as_slice() {
            matches.insert(dir.name.clone(), true);
        } else {
            if head.trim().is_empty() {
                for verb in verbs.iter().filter(|v| v.starts_with(word)) {
                    matches.insert(verb.clone(), false);
                }
            }
            for entry in entries.iter().filter(|e| e.name.starts_with(word)) {
                matches.insert(entry.name.clone(), entry.is_dir());
            }
        }

        match matches.len() {
            0 => Completion::None,
            1 => {
                let Some((name, is_dir)) = matches.first() else {
                    return Completion::None;
                };
                let suffix = if *is_dir { "/" } else { "" };
                self.buffer = format!("{head}{name}{suffix}");
                Completion::Replaced
            }
            _ => {
                let listing = matches.keys().cloned().collect::<Vec<_>>().join("  ");
                session.push_output(listing);
                Completion::Listed
            }
        }
    }
}
