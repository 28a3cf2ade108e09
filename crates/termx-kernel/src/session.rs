//! The single unit of mutable console state.
//!
//! A `Session` owns the filesystem, the current path, display history and
//! the raw command log. Every component takes it by `&mut` reference.

use termx_types::{FileTree, FsNode, HistoryEntry};

use crate::vfs::{VfsPath, VirtualFs};

/// Content of the seeded `welcome.txt`.
pub const WELCOME_TEXT: &str =
    "Welcome to TerminalX with Real System Monitoring! Type `help` to see available commands.";

/// Default home directory in wire form.
pub const DEFAULT_HOME: &str = "home/user";

/// Console state for one interactive run.
#[derive(Debug, Clone)]
pub struct Session {
    pub fs: VirtualFs,
    pub cwd: VfsPath,
    pub home: VfsPath,
    pub history: Vec<HistoryEntry>,
    /// Submitted lines, oldest first. Distinct from display history.
    pub command_log: Vec<String>,
    /// Position in `command_log` while recalling with Up/Down.
    pub history_cursor: Option<usize>,
    pub monitor_active: bool,
    pub backend_reachable: bool,
    /// Whether remote dispatch is wanted at all (`backend on|off`).
    pub use_backend: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(VfsPath::parse(DEFAULT_HOME))
    }
}

impl Session {
    /// A session whose filesystem holds `home` with `welcome.txt` and an
    /// empty `projects/` inside it. The current path starts at `home`.
    pub fn new(home: VfsPath) -> Self {
        let home_dir = FsNode::directory()
            .with_child("welcome.txt", FsNode::file(WELCOME_TEXT))
            .with_child("projects", FsNode::directory());
        let tree = seed_tree(&home, home_dir);
        Self::with_tree(tree, home)
    }

    /// A session over an arbitrary tree. `home` is also the initial path.
    pub fn with_tree(tree: FileTree, home: VfsPath) -> Self {
        Self {
            fs: VirtualFs::new(tree),
            cwd: home.clone(),
            home,
            history: Vec::new(),
            command_log: Vec::new(),
            history_cursor: None,
            monitor_active: false,
            backend_reachable: false,
            use_backend: true,
        }
    }

    /// True if commands should be attempted remotely first.
    pub fn wants_remote(&self) -> bool {
        self.backend_reachable && self.use_backend
    }

    pub fn push_output(&mut self, content: impl Into<String>) {
        self.history.push(HistoryEntry::output(content));
    }

    /// Echo a submitted line together with the path it was typed at.
    pub fn push_input(&mut self, raw: impl Into<String>) {
        let path = self.cwd.to_wire();
        self.history.push(HistoryEntry::input(raw, path));
    }

    /// Startup banner: the welcome file (if still present) plus a note on
    /// backend connectivity.
    pub fn push_welcome(&mut self) {
        let mut message = self
            .fs
            .read_file(&self.home.join("welcome.txt"))
            .unwrap_or(WELCOME_TEXT)
            .to_string();
        if self.backend_reachable {
            message.push_str("\n\nBackend connected - Real system monitoring available!");
            message.push_str("\nTry: top, htop, free, df, uptime, ps, iostat, vmstat");
        } else {
            message.push_str("\n\nBackend disconnected - Using local simulation only");
            message.push_str("\nStart the backend and run `backend connect` to use it.");
        }
        self.push_output(message);
    }

    /// The most recent output entry, if any.
    pub fn last_output(&self) -> Option<&str> {
        self.history.iter().rev().find_map(HistoryEntry::as_output)
    }
}

/// Wrap `home_dir` in one directory per segment of `home`.
fn seed_tree(home: &VfsPath, home_dir: FsNode) -> FileTree {
    let root = home
        .segments()
        .iter()
        .rev()
        .fold(home_dir, |child, name| {
            FsNode::directory().with_child(name.clone(), child)
        });
    match root {
        FsNode::Directory { children } => FileTree::from_children(children),
        FsNode::File { .. } => FileTree::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_is_seeded() {
        let session = Session::default();
        assert_eq!(session.cwd.to_string(), "/home/user");
        assert_eq!(
            session
                .fs
                .read_file(&VfsPath::parse("home/user/welcome.txt"))
                .unwrap(),
            WELCOME_TEXT
        );
        assert!(session
            .fs
            .resolve(&VfsPath::parse("home/user/projects"))
            .unwrap()
            .is_dir());
        assert!(session.history.is_empty());
        assert!(!session.backend_reachable);
        assert!(session.use_backend);
    }

    #[test]
    fn test_custom_home() {
        let session = Session::new(VfsPath::parse("users/alice/work"));
        assert!(session
            .fs
            .resolve(&VfsPath::parse("users/alice/work/welcome.txt"))
            .is_ok());
    }

    #[test]
    fn test_root_home() {
        let session = Session::new(VfsPath::root());
        assert!(session.fs.resolve(&VfsPath::parse("welcome.txt")).is_ok());
    }

    #[test]
    fn test_welcome_banner_mentions_connectivity() {
        let mut session = Session::default();
        session.push_welcome();
        let text = session.last_output().unwrap();
        assert!(text.starts_with(WELCOME_TEXT));
        assert!(text.contains("Backend disconnected"));

        session.backend_reachable = true;
        session.push_welcome();
        assert!(session.last_output().unwrap().contains("Backend connected"));
    }

    #[test]
    fn test_push_input_records_path() {
        let mut session = Session::default();
        session.push_input("ls");
        assert_eq!(
            session.history[0],
            HistoryEntry::input("ls", "home/user")
        );
    }
}
