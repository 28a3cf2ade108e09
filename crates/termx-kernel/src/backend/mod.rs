//! Remote execution backend.
//!
//! The console can hand commands to a remote service that owns the real
//! implementation. [`BackendClient`] is the contract the router and the
//! monitor depend on; the HTTP implementation lives in `termx-client`.
//!
//! ```text
//! Router ──► BackendClient::execute_command ──► CommandResponse
//!   │                │ Err(transport)
//!   │                ▼
//!   └────────► local tool registry
//! ```

pub mod testing;

use async_trait::async_trait;
use thiserror::Error;

use termx_types::{CommandResponse, FileTree, ProcessSample};

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors talking to the remote backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Connection refused, timeout, DNS failure and similar.
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    /// The backend answered with a non-2xx status.
    #[error("backend returned status {0}")]
    Status(u16),

    /// The body could not be decoded.
    #[error("malformed backend response: {0}")]
    Malformed(String),
}

impl BackendError {
    /// True if this failure means the backend should be treated as offline.
    ///
    /// A malformed body still proves something answered, so it does not
    /// count.
    pub fn is_transport(&self) -> bool {
        matches!(self, BackendError::Unreachable(_) | BackendError::Status(_))
    }
}

/// Remote command execution and process sampling.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Base URL, for status display.
    fn base_url(&self) -> &str;

    /// `GET /api/health`. Never fails; any problem reads as unreachable.
    async fn check_health(&self) -> bool;

    /// `POST /api/command` with the canonical line and a filesystem snapshot.
    ///
    /// `current_path` is in wire form (no leading slash).
    async fn execute_command(
        &self,
        command: &str,
        current_path: &str,
        file_system: &FileTree,
    ) -> BackendResult<CommandResponse>;

    /// `GET /api/processes`. An empty list means "nothing new", not "no
    /// processes".
    async fn fetch_process_snapshot(&self) -> BackendResult<Vec<ProcessSample>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(BackendError::Unreachable("refused".into()).is_transport());
        assert!(BackendError::Status(503).is_transport());
        assert!(!BackendError::Malformed("eof".into()).is_transport());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            BackendError::Status(500).to_string(),
            "backend returned status 500"
        );
    }
}
