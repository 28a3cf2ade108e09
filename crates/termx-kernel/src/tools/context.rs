//! Execution context for tools.

use std::sync::Arc;

use crate::backend::BackendClient;
use crate::session::Session;
use crate::vfs::{VfsPath, VfsResult};

use super::traits::ToolSchema;

/// Execution context passed to tools.
///
/// Borrows the session for the duration of one command.
pub struct ExecContext<'a> {
    /// The session being operated on.
    pub session: &'a mut Session,
    /// Remote backend, for `backend connect`.
    pub backend: Option<Arc<dyn BackendClient>>,
    /// Schemas of every registered tool, in registration order.
    pub schemas: Vec<ToolSchema>,
}

impl<'a> ExecContext<'a> {
    pub fn new(session: &'a mut Session) -> Self {
        Self {
            session,
            backend: None,
            schemas: Vec::new(),
        }
    }

    pub fn with_backend(mut self, backend: Option<Arc<dyn BackendClient>>) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_schemas(mut self, schemas: Vec<ToolSchema>) -> Self {
        self.schemas = schemas;
        self
    }

    /// Resolve user input to an existing node's path, relative to the cwd.
    pub fn locate(&self, input: &str) -> VfsResult<VfsPath> {
        let s = &*self.session;
        s.fs.locate(&s.cwd, input, &s.home)
    }

    /// Split user input into an existing parent and a new name.
    pub fn split_target(&self, input: &str) -> VfsResult<(VfsPath, String)> {
        let s = &*self.session;
        s.fs.split_target(&s.cwd, input, &s.home)
    }
}
