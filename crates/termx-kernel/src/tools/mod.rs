//! Local interpreter verbs.
//!
//! Every verb the console can run without the backend is a tool: a type
//! implementing [`Tool`], registered by name in a [`ToolRegistry`]. The
//! router looks the verb up and applies the returned [`ToolOutput`] to the
//! session.
//!
//! # Architecture
//!
//! ```text
//! ToolRegistry
//! ├── Filesystem (ls, cd, mkdir, touch, cat, rm, pwd)
//! ├── Display (help, echo, clear, top, htop)
//! ├── System reports (free, df, uptime, ps, iostat, vmstat)
//! └── backend
//! ```

mod builtin;
mod context;
mod registry;
mod traits;

pub use builtin::{register_builtins, SysReport};
pub use context::ExecContext;
pub use registry::ToolRegistry;
pub use traits::{Tool, ToolOutput, ToolSchema};

/// A registry holding every built-in.
pub fn builtin_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_builtins(&mut registry);
    registry
}
