//! echo: Display a line of text.

use async_trait::async_trait;

use crate::tools::{ExecContext, Tool, ToolOutput, ToolSchema};

/// Echo tool: print arguments joined by single spaces.
pub struct Echo;

#[async_trait]
impl Tool for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("echo", "Display a line of text.").usage("echo [text]")
    }

    async fn execute(&self, args: &[String], _ctx: &mut ExecContext<'_>) -> ToolOutput {
        ToolOutput::Text(args.join(" "))
    }
}
