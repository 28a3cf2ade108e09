//! pwd: Print working directory.

use async_trait::async_trait;

use crate::tools::{ExecContext, Tool, ToolOutput, ToolSchema};

/// Pwd tool: print the current path with a leading slash.
pub struct Pwd;

#[async_trait]
impl Tool for Pwd {
    fn name(&self) -> &str {
        "pwd"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("pwd", "Print name of current/working directory.")
    }

    async fn execute(&self, _args: &[String], ctx: &mut ExecContext<'_>) -> ToolOutput {
        ToolOutput::Text(ctx.session.cwd.to_string())
    }
}
