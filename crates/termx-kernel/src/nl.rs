//! Natural-language phrasing → canonical command.
//!
//! An ordered table of (pattern, template) rules. Rules are tried top to
//! bottom against the trimmed input and the first match wins. Patterns are
//! case-insensitive and anchored at the start. A template's `{}` is replaced
//! by the single captured argument. Input that matches nothing is returned
//! unchanged.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// (pattern, template) pairs in priority order.
const DEFAULT_RULES: &[(&str, &str)] = &[
    (r"^create a (?:folder|directory) named\s+(.+)$", "mkdir {}"),
    (r"^make a file named\s+(.+)$", "touch {}"),
    (r"^delete file\s+(.+)$", "rm {}"),
    (r"^show me the contents of\s+(.+)$", "cat {}"),
    (r"^open file\s+(.+)$", "cat {}"),
    (r"^read file\s+(.+)$", "cat {}"),
    (r"^where am i[?.!]*$", "pwd"),
    (r"^go to (?:folder|directory)\s+(.+)$", "cd {}"),
    (r"^(?:show|list) files[.!]*$", "ls"),
    (r"^clear screen[.!]*$", "clear"),
    (r"^show system info[.!]*$", "top"),
    (r"^show memory usage[.!]*$", "free"),
    (r"^show disk usage[.!]*$", "df"),
    (r"^show uptime[.!]*$", "uptime"),
    (r"^show processes[.!]*$", "ps"),
];

static DEFAULT_TRANSLATOR: LazyLock<Translator> =
    LazyLock::new(|| Translator::with_rules(DEFAULT_RULES.iter().copied()));

/// Translate with the built-in rule table.
pub fn translate(input: &str) -> String {
    DEFAULT_TRANSLATOR.translate(input)
}

struct Rule {
    pattern: Regex,
    template: String,
}

/// A compiled rule table.
pub struct Translator {
    rules: Vec<Rule>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::with_rules(DEFAULT_RULES.iter().copied())
    }
}

impl Translator {
    /// Compile a rule table. Patterns that fail to compile are logged and
    /// skipped.
    pub fn with_rules<'a>(rules: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let rules = rules
            .into_iter()
            .filter_map(|(pattern, template)| {
                match RegexBuilder::new(pattern).case_insensitive(true).build() {
                    Ok(pattern) => Some(Rule {
                        pattern,
                        template: template.to_string(),
                    }),
                    Err(e) => {
                        tracing::error!(pattern, error = %e, "skipping invalid translation rule");
                        None
                    }
                }
            })
            .collect();
        Self { rules }
    }

    /// Number of compiled rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Translate one line. Pure: no state is read or written.
    pub fn translate(&self, input: &str) -> String {
        let trimmed = input.trim();
        for rule in &self.rules {
            if let Some(caps) = rule.pattern.captures(trimmed) {
                let arg = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
                let canonical = rule.template.replace("{}", arg);
                tracing::debug!(input, %canonical, "translated natural-language input");
                return canonical;
            }
        }
        input.to_string()
    }
}
