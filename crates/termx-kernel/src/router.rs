//! Command routing: remote first, local fallback.
//!
//! One submitted line moves the router through
//!
//! ```text
//! Idle ─► Dispatching ─┬─► RemoteSucceeded ─┐
//!                      └─► LocalFallback ───┴─► Idle
//! ```
//!
//! Only one line may be in flight at a time; a second `submit` while the
//! first is suspended on the backend is rejected with [`RouterError::Busy`].
//! History entries are therefore appended in strict submission order.

use std::cell::Cell;
use std::sync::Arc;

use thiserror::Error;

use termx_types::{Command, CommandResponse};

use crate::backend::BackendClient;
use crate::nl;
use crate::session::Session;
use crate::tools::{ExecContext, ToolOutput, ToolRegistry, builtin_registry};
use crate::vfs::VfsPath;

/// Verbs that never go to the backend.
const LOCAL_ONLY: &[&str] = &["backend"];

/// Where the router is in handling the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchState {
    #[default]
    Idle,
    Dispatching,
    RemoteSucceeded,
    LocalFallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    #[error("a command is already being dispatched")]
    Busy,
}

/// How a line was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Empty line: only the input echo was recorded.
    Blank,
    /// The backend ran it successfully.
    Remote,
    /// The backend ran it and reported failure.
    RemoteError,
    /// The local interpreter ran it.
    Local,
    /// No local tool for the verb.
    Unknown,
}

/// Resets the dispatch state to `Idle` however the dispatch ends,
/// including when its future is dropped mid-await.
struct DispatchGuard<'a> {
    state: &'a Cell<DispatchState>,
}

impl<'a> DispatchGuard<'a> {
    fn enter(state: &'a Cell<DispatchState>) -> Result<Self, RouterError> {
        if state.get() != DispatchState::Idle {
            return Err(RouterError::Busy);
        }
        state.set(DispatchState::Dispatching);
        Ok(Self { state })
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.state.set(DispatchState::Idle);
    }
}

/// Routes submitted lines to the backend or the local tools.
///
/// Runs on a single-threaded event loop; the router is not `Sync`.
pub struct Router {
    registry: ToolRegistry,
    backend: Option<Arc<dyn BackendClient>>,
    state: Cell<DispatchState>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(builtin_registry(), None)
    }
}

impl Router {
    pub fn new(registry: ToolRegistry, backend: Option<Arc<dyn BackendClient>>) -> Self {
        Self {
            registry,
            backend,
            state: Cell::new(DispatchState::Idle),
        }
    }

    /// Built-in tools plus the given backend.
    pub fn with_backend(backend: Arc<dyn BackendClient>) -> Self {
        Self::new(builtin_registry(), Some(backend))
    }

    pub fn state(&self) -> DispatchState {
        self.state.get()
    }

    pub fn is_idle(&self) -> bool {
        self.state.get() == DispatchState::Idle
    }

    pub fn backend(&self) -> Option<&Arc<dyn BackendClient>> {
        self.backend.as_ref()
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Every verb the local interpreter knows, for tab completion.
    pub fn verbs(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Run the health check and record the result on the session.
    ///
    /// Without a backend the session is simply marked unreachable.
    pub async fn check_health(&self, session: &mut Session) -> bool {
        let reachable = match &self.backend {
            Some(backend) => backend.check_health().await,
            None => false,
        };
        if reachable != session.backend_reachable {
            tracing::info!(reachable, "backend connectivity changed");
        }
        session.backend_reachable = reachable;
        reachable
    }

    /// Handle one submitted line.
    ///
    /// The line is translated, echoed into history with the current path,
    /// then run remotely when the backend is reachable and enabled, falling
    /// back to the local tools on transport or decoding failures.
    pub async fn submit(&self, session: &mut Session, raw: &str) -> Result<Route, RouterError> {
        let _guard = DispatchGuard::enter(&self.state)?;

        let command = Command::parse(raw, nl::translate(raw));
        session.push_input(raw);
        session.monitor_active = false;

        if command.is_empty() {
            return Ok(Route::Blank);
        }

        if let Some(backend) = self.remote_for(session, &command)
            && let Some(route) = self.try_remote(&backend, session, &command).await
        {
            return Ok(route);
        }

        self.state.set(DispatchState::LocalFallback);
        Ok(self.run_local(session, &command).await)
    }

    fn remote_for(&self, session: &Session, command: &Command) -> Option<Arc<dyn BackendClient>> {
        if LOCAL_ONLY.contains(&command.verb.as_str()) || !session.wants_remote() {
            return None;
        }
        self.backend.clone()
    }

    /// `None` means "fall back to local".
    async fn try_remote(
        &self,
        backend: &Arc<dyn BackendClient>,
        session: &mut Session,
        command: &Command,
    ) -> Option<Route> {
        let snapshot = session.fs.snapshot();
        let result = backend
            .execute_command(&command.canonical, &session.cwd.to_wire(), &snapshot)
            .await;

        match result {
            Ok(response) if response.success => {
                self.state.set(DispatchState::RemoteSucceeded);
                tracing::debug!(verb = %command.verb, "remote dispatch succeeded");
                apply_remote(session, &command.verb, response);
                Some(Route::Remote)
            }
            Ok(response) => {
                tracing::debug!(verb = %command.verb, "backend reported failure");
                session.push_output(response.failure_text());
                Some(Route::RemoteError)
            }
            Err(e) if e.is_transport() => {
                tracing::warn!(error = %e, "backend unreachable, falling back to local");
                if session.backend_reachable {
                    tracing::info!(reachable = false, "backend connectivity changed");
                }
                session.backend_reachable = false;
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "bad backend response, falling back to local");
                None
            }
        }
    }

    async fn run_local(&self, session: &mut Session, command: &Command) -> Route {
        let Some(tool) = self.registry.get(&command.verb) else {
            tracing::debug!(verb = %command.verb, "unknown verb");
            session.push_output(format!("command not found: {}", command.verb));
            return Route::Unknown;
        };

        let output = {
            let mut ctx = ExecContext::new(session)
                .with_backend(self.backend.clone())
                .with_schemas(self.registry.schemas());
            tool.execute(&command.args, &mut ctx).await
        };
        tracing::debug!(verb = %command.verb, ok = output.ok(), "local dispatch");
        apply_output(session, output);
        Route::Local
    }
}

/// Install an authoritative remote result. Local state is overwritten, never
/// merged.
fn apply_remote(session: &mut Session, verb: &str, response: CommandResponse) {
    if let Some(tree) = response.new_file_system {
        session.fs.replace(tree);
    }
    if let Some(path) = response.new_path {
        session.cwd = VfsPath::parse(&path);
    }
    match verb {
        "top" | "htop" => apply_output(session, ToolOutput::EnterMonitor),
        "clear" => apply_output(session, ToolOutput::ClearScreen),
        _ if response.output.is_empty() => {}
        _ => session.push_output(response.output),
    }
}

fn apply_output(session: &mut Session, output: ToolOutput) {
    match output {
        ToolOutput::Silent => {}
        ToolOutput::Text(s) | ToolOutput::Failure(s) => session.push_output(s),
        ToolOutput::ClearScreen => session.history.clear(),
        ToolOutput::EnterMonitor => {
            session.history.clear();
            session.monitor_active = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendError;
    use crate::backend::testing::MockBackend;
    use termx_types::{FileTree, HistoryEntry};

    fn online(mock: &Arc<MockBackend>) -> (Router, Session) {
        let router = Router::with_backend(mock.clone());
        let mut session = Session::default();
        session.backend_reachable = true;
        (router, session)
    }

    #[tokio::test]
    async fn test_blank_line_only_echoes() {
        let router = Router::default();
        let mut session = Session::default();
        assert_eq!(router.submit(&mut session, "").await, Ok(Route::Blank));
        assert_eq!(session.history, vec![HistoryEntry::input("", "home/user")]);
        assert!(router.is_idle());
    }

    #[tokio::test]
    async fn test_unknown_verb() {
        let router = Router::default();
        let mut session = Session::default();
        assert_eq!(router.submit(&mut session, "frobnicate x").await, Ok(Route::Unknown));
        assert_eq!(session.last_output(), Some("command not found: frobnicate"));
    }

    #[tokio::test]
    async fn test_local_silent_commands_add_no_output() {
        let router = Router::default();
        let mut session = Session::default();
        router.submit(&mut session, "mkdir notes").await.unwrap();
        router.submit(&mut session, "cd notes").await.unwrap();
        assert_eq!(session.history.len(), 2);
        assert!(session.history.iter().all(|e| e.as_output().is_none()));
        assert_eq!(session.cwd, VfsPath::parse("home/user/notes"));
    }

    #[tokio::test]
    async fn test_natural_language_is_translated_before_dispatch() {
        let router = Router::default();
        let mut session = Session::default();
        router
            .submit(&mut session, "create a folder named notes")
            .await
            .unwrap();
        assert!(session.fs.resolve(&VfsPath::parse("home/user/notes")).is_ok());
        assert_eq!(
            session.history[0],
            HistoryEntry::input("create a folder named notes", "home/user")
        );
    }

    #[tokio::test]
    async fn test_local_top_clears_history_and_enters_monitor() {
        let router = Router::default();
        let mut session = Session::default();
        router.submit(&mut session, "echo hi").await.unwrap();
        router.submit(&mut session, "top").await.unwrap();
        assert!(session.history.is_empty());
        assert!(session.monitor_active);

        router.submit(&mut session, "pwd").await.unwrap();
        assert!(!session.monitor_active);
    }

    #[tokio::test]
    async fn test_remote_success_replaces_state() {
        let mock = Arc::new(MockBackend::online());
        let mut response = CommandResponse::ok("done");
        response.new_file_system = Some(FileTree::new());
        response.new_path = Some("".into());
        mock.push_reply(Ok(response));

        let (router, mut session) = online(&mock);
        assert_eq!(router.submit(&mut session, "make a file named x").await, Ok(Route::Remote));

        assert!(session.cwd.is_root());
        assert!(session.fs.snapshot().entries().is_empty());
        assert_eq!(session.last_output(), Some("done"));

        let sent = &mock.requests()[0];
        assert_eq!(sent.command, "touch x");
        assert_eq!(sent.current_path, "home/user");
        assert!(sent.file_system.entries().contains_key("home"));
    }

    #[tokio::test]
    async fn test_remote_absent_fields_leave_state() {
        let mock = Arc::new(MockBackend::online());
        mock.push_reply(Ok(CommandResponse::ok("")));
        let (router, mut session) = online(&mock);
        let before = session.fs.snapshot();

        router.submit(&mut session, "pwd").await.unwrap();
        assert!(Arc::ptr_eq(&before, &session.fs.snapshot()));
        assert_eq!(session.cwd, VfsPath::parse("home/user"));
        assert_eq!(session.history.len(), 1);
    }

    #[tokio::test]
    async fn test_remote_failure_is_shown_not_retried() {
        let mock = Arc::new(MockBackend::online());
        let mut response = CommandResponse::failed("");
        response.error = Some("disk on fire".into());
        mock.push_reply(Ok(response));
        let (router, mut session) = online(&mock);

        assert_eq!(router.submit(&mut session, "ls").await, Ok(Route::RemoteError));
        assert_eq!(session.last_output(), Some("disk on fire"));
        assert!(session.backend_reachable);
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_error_falls_back_and_marks_offline() {
        let mock = Arc::new(MockBackend::online());
        mock.push_reply(Err(BackendError::Unreachable("refused".into())));
        let (router, mut session) = online(&mock);

        assert_eq!(router.submit(&mut session, "pwd").await, Ok(Route::Local));
        assert_eq!(session.last_output(), Some("/home/user"));
        assert!(!session.backend_reachable);

        // Later lines skip the backend entirely.
        router.submit(&mut session, "pwd").await.unwrap();
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_response_falls_back_but_stays_online() {
        let mock = Arc::new(MockBackend::online());
        mock.push_reply(Err(BackendError::Malformed("eof".into())));
        let (router, mut session) = online(&mock);

        assert_eq!(router.submit(&mut session, "echo hi").await, Ok(Route::Local));
        assert_eq!(session.last_output(), Some("hi"));
        assert!(session.backend_reachable);
    }

    #[tokio::test]
    async fn test_backend_verb_is_always_local() {
        let mock = Arc::new(MockBackend::online());
        let (router, mut session) = online(&mock);
        router.submit(&mut session, "backend off").await.unwrap();
        assert!(!session.use_backend);
        assert!(mock.requests().is_empty());

        router.submit(&mut session, "pwd").await.unwrap();
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_remote_top_and_clear() {
        let mock = Arc::new(MockBackend::online());
        mock.push_reply(Ok(CommandResponse::ok("table")));
        mock.push_reply(Ok(CommandResponse::ok("")));
        let (router, mut session) = online(&mock);

        router.submit(&mut session, "top").await.unwrap();
        assert!(session.monitor_active);
        assert!(session.history.is_empty());

        router.submit(&mut session, "clear").await.unwrap();
        assert!(!session.monitor_active);
        assert!(session.history.is_empty());
    }

    #[tokio::test]
    async fn test_check_health_updates_session() {
        let mock = Arc::new(MockBackend::offline());
        let router = Router::with_backend(mock.clone());
        let mut session = Session::default();
        session.backend_reachable = true;
        assert!(!router.check_health(&mut session).await);
        assert!(!session.backend_reachable);

        mock.set_healthy(true);
        assert!(router.check_health(&mut session).await);
        assert!(session.backend_reachable);

        assert!(!Router::default().check_health(&mut session).await);
    }
}
