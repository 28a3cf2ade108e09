//! Parsed commands.

/// A submitted line after translation to canonical form.
///
/// `verb` is the first whitespace-separated word of `canonical` (empty for a
/// blank line) and `args` are the remaining words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// The line as typed.
    pub raw: String,
    /// The canonical command string after natural-language translation.
    pub canonical: String,
    /// Command verb.
    pub verb: String,
    /// Arguments in order.
    pub args: Vec<String>,
}

impl Command {
    /// Split a canonical command string into verb and arguments.
    pub fn parse(raw: impl Into<String>, canonical: impl Into<String>) -> Self {
        let canonical = canonical.into();
        let mut words = canonical.split_whitespace().map(str::to_string);
        let verb = words.next().unwrap_or_default();
        let args = words.collect();
        Self {
            raw: raw.into(),
            canonical,
            verb,
            args,
        }
    }

    /// True for a blank line.
    pub fn is_empty(&self) -> bool {
        self.verb.is_empty()
    }

    /// First argument, if any.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}
