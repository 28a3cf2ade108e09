//! clear: Clear the screen.

use async_trait::async_trait;

use crate::tools::{ExecContext, Tool, ToolOutput, ToolSchema};

/// Clear tool: drop all display history.
pub struct Clear;

#[async_trait]
impl Tool for Clear {
    fn name(&self) -> &str {
        "clear"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("clear", "Clear the terminal screen.")
    }

    async fn execute(&self, _args: &[String], _ctx: &mut ExecContext<'_>) -> ToolOutput {
        ToolOutput::ClearScreen
    }
}
