//! touch: Create an empty file.

use async_trait::async_trait;

use crate::tools::{ExecContext, Tool, ToolOutput, ToolSchema};
use crate::vfs::{Touched, VfsError};

/// Touch tool: create an empty file if nothing by that name exists.
///
/// Timestamps are not modelled, so touching an existing entry does nothing.
pub struct Touch;

#[async_trait]
impl Tool for Touch {
    fn name(&self) -> &str {
        "touch"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("touch", "Create a new empty file.").usage("touch [file]")
    }

    async fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> ToolOutput {
        let Some(arg) = args.first() else {
            return ToolOutput::failure("touch: missing file operand");
        };

        let result = ctx
            .split_target(arg)
            .and_then(|(parent, name)| ctx.session.fs.create_file(&parent, &name));

        match result {
            Ok(Touched::Created) => {
                tracing::debug!(file = %arg, "created file");
                ToolOutput::Silent
            }
            // `.`, `..` and `~` name directories that already exist.
            Ok(Touched::Existing) | Err(VfsError::InvalidName(_)) => ToolOutput::Silent,
            Err(_) => ToolOutput::failure(format!(
                "touch: cannot touch '{}': No such file or directory",
                arg
            )),
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
    async fn test_touch_creates_empty_file() {
        let mut session = Session::default();
        let mut ctx = ExecContext::new(&mut session);
        assert_eq!(Touch.execute(&args(&["a.txt"]), &mut ctx).await, ToolOutput::Silent);
        assert_eq!(
            ctx.session.fs.read_file(&VfsPath::parse("home/user/a.txt")),
            Ok("")
        );
    }

    #[tokio::test]
    async fn test_touch_existing_keeps_content() {
        let mut session = Session::default();
        let mut ctx = ExecContext::new(&mut session);
        assert_eq!(
            Touch.execute(&args(&["welcome.txt"]), &mut ctx).await,
            ToolOutput::Silent
        );
        assert_eq!(
            ctx.session.fs.read_file(&VfsPath::parse("home/user/welcome.txt")),
            Ok(WELCOME_TEXT)
        );
    }

    #[tokio::test]
    async fn test_touch_missing_operand() {
        let mut session = Session::default();
        let mut ctx = ExecContext::new(&mut session);
        assert_eq!(
            Touch.execute(&[], &mut ctx).await,
            ToolOutput::failure("touch: missing file operand")
        );
    }

    #[tokio::test]
    async fn test_touch_tilde_is_home() {
        let mut session = Session::default();
        let before = session.fs.snapshot();
        let mut ctx = ExecContext::new(&mut session);
        assert_eq!(Touch.execute(&args(&["~"]), &mut ctx).await, ToolOutput::Silent);
        assert!(std::sync::Arc::ptr_eq(&before, &ctx.session.fs.snapshot()));
    }
}
