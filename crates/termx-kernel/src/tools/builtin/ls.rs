//! ls: List directory contents.

use async_trait::async_trait;

use crate::tools::{ExecContext, Tool, ToolOutput, ToolSchema};
use crate::vfs::VfsError;

/// Ls tool: one entry per line, directories marked with a trailing `/`.
pub struct Ls;

#[async_trait]
impl Tool for Ls {
    fn name(&self) -> &str {
        "ls"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("ls", "List directory contents.").usage("ls [path]")
    }

    async fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> ToolOutput {
        let target = args.first().map(String::as_str);
        let path = match target {
            Some(arg) => match ctx.locate(arg) {
                Ok(path) => path,
                Err(_) => return not_found(arg),
            },
            None => ctx.session.cwd.clone(),
        };

        match ctx.session.fs.list_directory(&path) {
            Ok(entries) => ToolOutput::Text(
                entries
                    .iter()
                    .map(|e| {
                        if e.is_dir() {
                            format!("{}/", e.name)
                        } else {
                            e.name.clone()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            // Like a shell, listing a file just names it.
            Err(VfsError::NotADirectory(_)) => {
                ToolOutput::Text(target.unwrap_or_default().to_string())
            }
            Err(_) => not_found(&path.to_string()),
        }
    }
}

fn not_found(arg: &str) -> ToolOutput {
    ToolOutput::failure(format!(
        "ls: cannot access '{}': No such file or directory",
        arg
    ))
}
