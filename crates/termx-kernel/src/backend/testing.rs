//! Scriptable in-memory backend for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use termx_types::{CommandRequest, CommandResponse, FileTree, ProcessSample};

use super::{BackendClient, BackendError, BackendResult};

/// Mock backend with scripted replies.
///
/// Command replies and process snapshots are served from FIFO queues. With
/// no scripted command reply, `execute_command` fails as unreachable; with
/// no scripted snapshot, `fetch_process_snapshot` returns an empty list.
pub struct MockBackend {
    healthy: AtomicBool,
    replies: Mutex<VecDeque<BackendResult<CommandResponse>>>,
    snapshots: Mutex<VecDeque<Vec<ProcessSample>>>,
    requests: Mutex<Vec<CommandRequest>>,
    health_calls: AtomicUsize,
    process_calls: AtomicUsize,
}

impl MockBackend {
    pub fn new(healthy: bool) -> Self {
        Self {
            healthy: AtomicBool::new(healthy),
            replies: Mutex::new(VecDeque::new()),
            snapshots: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            health_calls: AtomicUsize::new(0),
            process_calls: AtomicUsize::new(0),
        }
    }

    /// A backend whose health check succeeds.
    pub fn online() -> Self {
        Self::new(true)
    }

    /// A backend whose health check fails.
    pub fn offline() -> Self {
        Self::new(false)
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    /// Queue the result of the next `execute_command`.
    pub fn push_reply(&self, reply: BackendResult<CommandResponse>) {
        lock(&self.replies).push_back(reply);
    }

    /// Queue the result of the next `fetch_process_snapshot`.
    pub fn push_snapshot(&self, processes: Vec<ProcessSample>) {
        lock(&self.snapshots).push_back(processes);
    }

    /// Every command request received, oldest first.
    pub fn requests(&self) -> Vec<CommandRequest> {
        lock(&self.requests).clone()
    }

    pub fn health_calls(&self) -> usize {
        self.health_calls.load(Ordering::SeqCst)
    }

    pub fn process_calls(&self) -> usize {
        self.process_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::online()
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl BackendClient for MockBackend {
    fn base_url(&self) -> &str {
        "mock://backend"
    }

    async fn check_health(&self) -> bool {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        self.healthy.load(Ordering::SeqCst)
    }

    async fn execute_command(
        &self,
        command: &str,
        current_path: &str,
        file_system: &FileTree,
    ) -> BackendResult<CommandResponse> {
        lock(&self.requests).push(CommandRequest {
            command: command.to_string(),
            current_path: current_path.to_string(),
            file_system: file_system.clone(),
        });
        lock(&self.replies)
            .pop_front()
            .unwrap_or_else(|| Err(BackendError::Unreachable("no scripted reply".into())))
    }

    async fn fetch_process_snapshot(&self) -> BackendResult<Vec<ProcessSample>> {
        self.process_calls.fetch_add(1, Ordering::SeqCst);
        Ok(lock(&self.snapshots).pop_front().unwrap_or_default())
    }
}
