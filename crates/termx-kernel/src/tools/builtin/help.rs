//! help: List available verbs.

use async_trait::async_trait;

use crate::tools::{ExecContext, Tool, ToolOutput, ToolSchema};

/// Help tool: one line per registered verb, usage padded to 15 columns.
pub struct Help;

#[async_trait]
impl Tool for Help {
    fn name(&self) -> &str {
        "help"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("help", "Show this help message.")
    }

    async fn execute(&self, _args: &[String], ctx: &mut ExecContext<'_>) -> ToolOutput {
        let mut lines = vec!["Available commands:".to_string()];
        lines.extend(
            ctx.schemas
                .iter()
                .map(|s| format!("{:<15} {}", s.usage, s.description)),
        );
        ToolOutput::Text(lines.join("\n"))
    }
}
