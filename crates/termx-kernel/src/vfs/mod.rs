//! Virtual filesystem for a terminal session.
//!
//! A synthetic tree of directories and text files, held in memory. Paths are
//! absolute [`VfsPath`] values; user input is turned into paths with
//! [`VirtualFs::locate`] and [`VirtualFs::split_target`].

mod memory;
mod path;

pub use memory::{Touched, VirtualFs};
pub use path::VfsPath;

use thiserror::Error;

/// Errors from filesystem operations. Paths are in display form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VfsError {
    #[error("no such file or directory: {0}")]
    NotFound(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("is a directory: {0}")]
    IsDirectory(String),

    #[error("file exists: {0}")]
    AlreadyExists(String),

    #[error("invalid name: {0:?}")]
    InvalidName(String),
}

pub type VfsResult<T> = Result<T, VfsError>;
