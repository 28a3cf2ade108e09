//! Pure data types for termx: filesystem tree, history, process samples,
//! and the request/response shapes spoken with the remote backend.
//!
//! This crate is a leaf dependency with no async runtime and no I/O, so the
//! kernel, the HTTP client and the console all agree on one set of shapes.

pub mod command;
pub mod history;
pub mod node;
pub mod process;
pub mod wire;

// Flat re-exports for convenience
pub use command::*;
pub use history::*;
pub use node::*;
pub use process::*;
pub use wire::*;
