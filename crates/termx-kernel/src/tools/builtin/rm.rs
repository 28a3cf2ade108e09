//! rm: Remove a file or directory.

use async_trait::async_trait;

use crate::tools::{ExecContext, Tool, ToolOutput, ToolSchema};
use crate::vfs::VfsError;

/// Rm tool: remove one entry from its parent. Directories go with
/// everything under them, except the current directory and its parents.
pub struct Rm;

#[async_trait]
impl Tool for Rm {
    fn name(&self) -> &str {
        "rm"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("rm", "Remove a file or directory.").usage("rm [name]")
    }

    async fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> ToolOutput {
        let Some(arg) = args.first() else {
            return ToolOutput::failure("rm: missing operand");
        };

        // The current path must keep resolving after the removal.
        if let Ok(target) = ctx.locate(arg)
            && ctx.session.cwd.starts_with(&target)
        {
            return ToolOutput::failure(format!(
                "rm: refusing to remove '{}': current directory is inside it",
                arg
            ));
        }

        let result = ctx
            .split_target(arg)
            .and_then(|(parent, name)| ctx.session.fs.remove(&parent, &name));

        match result {
            Ok(()) => ToolOutput::Silent,
            Err(VfsError::InvalidName(_)) => {
                ToolOutput::failure("rm: refusing to remove '.' or '..' directory")
            }
            Err(_) => ToolOutput::failure(format!(
                "rm: cannot remove '{}': No such file or directory",
                arg
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use crate::tools::builtin::args;
    use crate::vfs::VfsPath;

    #[tokio::test]
    async fn test_rm_file() {
        let mut session = Session::default();
        let mut ctx = ExecContext::new(&mut session);
        assert_eq!(Rm.execute(&args(&["welcome.txt"]), &mut ctx).await, ToolOutput::Silent);
        assert!(ctx
            .session
            .fs
            .resolve(&VfsPath::parse("home/user/welcome.txt"))
            .is_err());
    }

    #[tokio::test]
    async fn test_rm_missing() {
        let mut session = Session::default();
        let mut ctx = ExecContext::new(&mut session);
        assert_eq!(
            Rm.execute(&args(&["ghost"]), &mut ctx).await,
            ToolOutput::failure("rm: cannot remove 'ghost': No such file or directory")
        );
        assert_eq!(
            Rm.execute(&[], &mut ctx).await,
            ToolOutput::failure("rm: missing operand")
        );
    }

    #[tokio::test]
    async fn test_rm_dotdot_refused() {
        let mut session = Session::default();
        let mut ctx = ExecContext::new(&mut session);
        let out = Rm.execute(&args(&[".."]), &mut ctx).await;
        assert!(!out.ok());
        assert!(ctx.session.fs.resolve(&VfsPath::parse("home/user")).is_ok());
    }

    #[tokio::test]
    async fn test_rm_refuses_cwd_and_parents() {
        let mut session = Session::default();
        session.cwd = VfsPath::parse("home/user/projects");
        let before = session.fs.snapshot();
        let mut ctx = ExecContext::new(&mut session);

        for target in ["/home/user", ".", "~", "/", "../projects"] {
            assert_eq!(
                Rm.execute(&args(&[target]), &mut ctx).await,
                ToolOutput::failure(format!(
                    "rm: refusing to remove '{target}': current directory is inside it"
                ))
            );
        }
        assert!(std::sync::Arc::ptr_eq(&before, &ctx.session.fs.snapshot()));
        assert!(ctx.session.fs.resolve(&ctx.session.cwd).is_ok());

        assert_eq!(
            Rm.execute(&args(&["../welcome.txt"]), &mut ctx).await,
            ToolOutput::Silent
        );
    }
}
