//! cd: Change working directory.

use async_trait::async_trait;

use crate::tools::{ExecContext, Tool, ToolOutput, ToolSchema};

/// Cd tool: change the session's current path.
///
/// No argument goes home. Success is silent.
pub struct Cd;

#[async_trait]
impl Tool for Cd {
    fn name(&self) -> &str {
        "cd"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("cd", "Change the current directory. Use \"..\" for parent.")
            .usage("cd [dir]")
    }

    async fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> ToolOutput {
        let target = args.first().map(String::as_str).unwrap_or("~");

        let path = match ctx.locate(target) {
            Ok(path) => path,
            Err(_) => {
                return ToolOutput::failure(format!("cd: no such file or directory: {}", target));
            }
        };

        match ctx.session.fs.resolve(&path) {
            Ok(node) if node.is_dir() => {
                tracing::debug!(from = %ctx.session.cwd, to = %path, "cd");
                ctx.session.cwd = path;
                ToolOutput::Silent
            }
            Ok(_) => ToolOutput::failure(format!("cd: not a directory: {}", target)),
            Err(_) => ToolOutput::failure(format!("cd: no such file or directory: {}", target)),
        }
    }
}
