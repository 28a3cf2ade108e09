//! Core tool traits and types.

use async_trait::async_trait;

use super::context::ExecContext;

/// Schema describing a tool's interface, used for the `help` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSchema {
    /// Verb name.
    pub name: String,
    /// Usage form shown by `help` (`cd [dir]`).
    pub usage: String,
    /// Short description.
    pub description: String,
}

impl ToolSchema {
    /// Create a schema whose usage is just the verb name.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            usage: name.clone(),
            name,
            description: description.into(),
        }
    }

    /// Set the usage form.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }
}

/// What a tool asks the router to do with the session after it ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutput {
    /// Nothing to show (successful `cd`, `mkdir`, `touch`).
    Silent,
    /// Append one output entry.
    Text(String),
    /// Append one output entry describing a failure.
    Failure(String),
    /// Clear display history.
    ClearScreen,
    /// Clear display history and switch to the live process table.
    EnterMonitor,
}

impl ToolOutput {
    pub fn text(s: impl Into<String>) -> Self {
        ToolOutput::Text(s.into())
    }

    pub fn failure(s: impl Into<String>) -> Self {
        ToolOutput::Failure(s.into())
    }

    /// True unless this is a failure.
    pub fn ok(&self) -> bool {
        !matches!(self, ToolOutput::Failure(_))
    }

    /// The text that would be appended to history, if any.
    pub fn content(&self) -> Option<&str> {
        match self {
            ToolOutput::Text(s) | ToolOutput::Failure(s) => Some(s),
            _ => None,
        }
    }
}

/// A verb the local interpreter understands.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The verb this tool answers to.
    fn name(&self) -> &str;

    /// Interface description for `help`.
    fn schema(&self) -> ToolSchema;

    /// Run with the words after the verb.
    async fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> ToolOutput;
}
