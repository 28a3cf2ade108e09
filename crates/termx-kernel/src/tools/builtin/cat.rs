//! cat: Display file content.

use async_trait::async_trait;

use crate::tools::{ExecContext, Tool, ToolOutput, ToolSchema};
use crate::vfs::VfsError;

/// Cat tool: print one file.
pub struct Cat;

#[async_trait]
impl Tool for Cat {
    fn name(&self) -> &str {
        "cat"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("cat", "Display file content.").usage("cat [file]")
    }

    async fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> ToolOutput {
        let Some(arg) = args.first() else {
            return ToolOutput::failure("cat: missing file operand");
        };

        let content = ctx
            .locate(arg)
            .and_then(|path| ctx.session.fs.read_file(&path).map(str::to_string));

        match content {
            Ok(content) if content.is_empty() => ToolOutput::text("(empty file)"),
            Ok(content) => ToolOutput::Text(content),
            Err(VfsError::IsDirectory(_)) => {
                ToolOutput::failure(format!("cat: {}: Is a directory", arg))
            }
            Err(_) => ToolOutput::failure(format!("cat: {}: No such file or directory", arg)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Session, WELCOME_TEXT};
    use crate::tools::builtin::args;
    use crate::vfs::VfsPath;

    #[tokio::test]
    async fn test_cat_file() {
        let mut session = Session::default();
        let mut ctx = ExecContext::new(&mut session);
        assert_eq!(
            Cat.execute(&args(&["welcome.txt"]), &mut ctx).await,
            ToolOutput::text(WELCOME_TEXT)
        );
    }

    #[tokio::test]
    async fn test_cat_relative_path_from_elsewhere() {
        let mut session = Session::default();
        session.cwd = VfsPath::parse("home");
        let mut ctx = ExecContext::new(&mut session);
        assert_eq!(
            Cat.execute(&args(&["user/welcome.txt"]), &mut ctx).await,
            ToolOutput::text(WELCOME_TEXT)
        );
    }

    #[tokio::test]
    async fn test_cat_empty_file() {
        let mut session = Session::default();
        session
            .fs
            .create_file(&VfsPath::parse("home/user"), "empty")
            .unwrap();
        let mut ctx = ExecContext::new(&mut session);
        assert_eq!(
            Cat.execute(&args(&["empty"]), &mut ctx).await,
            ToolOutput::text("(empty file)")
        );
    }

    #[tokio::test]
    async fn test_cat_errors() {
        let mut session = Session::default();
        let mut ctx = ExecContext::new(&mut session);
        assert_eq!(
            Cat.execute(&args(&["projects"]), &mut ctx).await,
            ToolOutput::failure("cat: projects: Is a directory")
        );
        assert_eq!(
            Cat.execute(&args(&["ghost"]), &mut ctx).await,
            ToolOutput::failure("cat: ghost: No such file or directory")
        );
        assert_eq!(
            Cat.execute(&[], &mut ctx).await,
            ToolOutput::failure("cat: missing file operand")
        );
    }
}
