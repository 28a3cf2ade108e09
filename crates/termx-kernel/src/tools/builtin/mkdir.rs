//! mkdir: Create a directory.

use async_trait::async_trait;

use crate::tools::{ExecContext, Tool, ToolOutput, ToolSchema};
use crate::vfs::VfsError;

/// Mkdir tool: create one empty directory. Success is silent.
pub struct Mkdir;

#[async_trait]
impl Tool for Mkdir {
    fn name(&self) -> &str {
        "mkdir"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("mkdir", "Create a new directory.").usage("mkdir [dir]")
    }

    async fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> ToolOutput {
        let Some(arg) = args.first() else {
            return ToolOutput::failure("mkdir: missing operand");
        };

        let result = ctx
            .split_target(arg)
            .and_then(|(parent, name)| ctx.session.fs.create_directory(&parent, &name));

        match result {
            Ok(()) => ToolOutput::Silent,
            Err(VfsError::AlreadyExists(_) | VfsError::InvalidName(_)) => ToolOutput::failure(
                format!("mkdir: cannot create directory '{}': File exists", arg),
            ),
            Err(VfsError::NotADirectory(_)) => ToolOutput::failure(format!(
                "mkdir: cannot create directory '{}': Not a directory",
                arg
            )),
            Err(_) => ToolOutput::failure(format!(
                "mkdir: cannot create directory '{}': No such file or directory",
                arg
            )),
        }
    }
}
