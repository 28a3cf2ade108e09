//! termx-kernel: the core of the termx console.
//!
//! This crate provides:
//!
//! - **VFS**: In-memory filesystem with snapshot-and-swap mutation
//! - **NL**: Ordered rule table turning phrases into canonical commands
//! - **Session**: The single owned state record of a console run
//! - **Router**: Remote-first dispatch with local fallback
//! - **Tools**: Tool trait, registry, and builtin verbs
//! - **Editor**: Line buffer, command recall and tab completion
//! - **Monitor**: Cancellable refresh loop for the process table
//! - **Backend**: The remote backend contract and a scriptable mock
//! - **Config**: TOML configuration with environment overrides

pub mod backend;
pub mod config;
pub mod editor;
pub mod monitor;
pub mod nl;
pub mod router;
pub mod session;
pub mod tools;
pub mod vfs;

pub use backend::{BackendClient, BackendError, BackendResult};
pub use config::{MonitorConfig, TerminalConfig};
pub use editor::{Completion, Key, LineEditor};
pub use monitor::{DataOrigin, MonitorLoop, MonitorView, SampleSource};
pub use nl::{Translator, translate};
pub use router::{DispatchState, Route, Router, RouterError};
pub use session::{Session, WELCOME_TEXT};
pub use vfs::{Touched, VfsError, VfsPath, VfsResult, VirtualFs};
