//! End-to-end console scenarios against the kernel API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rstest::rstest;

use termx_kernel::backend::testing::MockBackend;
use termx_kernel::{
    BackendClient, BackendResult, Completion, LineEditor, MonitorLoop, Route, Router,
    RouterError, SampleSource, Session, VfsError, VfsPath, WELCOME_TEXT, translate,
};
use termx_types::{CommandResponse, FileTree, HistoryEntry, ProcessSample};

fn outputs(session: &Session) -> Vec<&str> {
    session
        .history
        .iter()
        .filter_map(HistoryEntry::as_output)
        .collect()
}

#[tokio::test]
async fn mkdir_twice_fails_and_leaves_tree_unchanged() {
    let router = Router::default();
    let mut session = Session::default();

    router.submit(&mut session, "mkdir notes").await.unwrap();
    let before = session.fs.snapshot();
    router.submit(&mut session, "mkdir notes").await.unwrap();

    assert!(Arc::ptr_eq(&before, &session.fs.snapshot()));
    assert_eq!(
        outputs(&session),
        vec!["mkdir: cannot create directory 'notes': File exists"]
    );
    let listing = session.fs.list_directory(&session.home).unwrap();
    assert_eq!(listing.iter().filter(|e| e.name == "notes").count(), 1);
}

#[rstest]
#[case("projects")]
#[case("notes")]
#[tokio::test]
async fn cd_round_trip_returns_to_same_node(#[case] dir: &str) {
    let router = Router::default();
    let mut session = Session::default();
    router.submit(&mut session, "mkdir notes").await.unwrap();

    let start = session.cwd.clone();
    let before = session.fs.resolve(&start).unwrap().clone();

    router.submit(&mut session, &format!("cd {dir}")).await.unwrap();
    router.submit(&mut session, "cd ..").await.unwrap();

    assert_eq!(session.cwd, start);
    assert_eq!(session.fs.resolve(&session.cwd).unwrap(), &before);
}

#[tokio::test]
async fn cd_dotdot_never_escapes_root() {
    let router = Router::default();
    let mut session = Session::default();

    router.submit(&mut session, "cd ..").await.unwrap();
    assert_eq!(session.cwd, VfsPath::parse("home"));
    router.submit(&mut session, "cd ..").await.unwrap();
    assert!(session.cwd.is_root());
    router.submit(&mut session, "cd ..").await.unwrap();
    assert!(session.cwd.is_root());

    router.submit(&mut session, "pwd").await.unwrap();
    assert_eq!(session.last_output(), Some("/"));
    assert!(session.fs.resolve(&session.cwd).unwrap().is_dir());
}

#[tokio::test]
async fn rm_of_a_parent_keeps_navigation_working() {
    let router = Router::default();
    let mut session = Session::default();

    router.submit(&mut session, "cd projects").await.unwrap();
    router.submit(&mut session, "rm /home/user").await.unwrap();
    assert_eq!(
        session.last_output(),
        Some("rm: refusing to remove '/home/user': current directory is inside it")
    );
    assert!(session.fs.resolve(&session.cwd).is_ok());

    router.submit(&mut session, "cd ..").await.unwrap();
    assert_eq!(session.cwd, VfsPath::parse("home/user"));
    router.submit(&mut session, "ls").await.unwrap();
    assert_eq!(session.last_output(), Some("welcome.txt\nprojects/"));

    router.submit(&mut session, "cd projects").await.unwrap();
    router.submit(&mut session, "cd").await.unwrap();
    assert_eq!(session.cwd, VfsPath::parse("home/user"));
}

#[tokio::test]
async fn mkdir_tilde_creates_nothing() {
    let router = Router::default();
    let mut session = Session::default();
    let before = session.fs.snapshot();

    router.submit(&mut session, "mkdir ~").await.unwrap();
    router.submit(&mut session, "touch ~").await.unwrap();

    assert!(Arc::ptr_eq(&before, &session.fs.snapshot()));
    assert!(session.fs.resolve(&VfsPath::parse("home/user/~")).is_err());
}

#[test]
fn translation_examples() {
    assert_eq!(translate("create a folder named notes"), "mkdir notes");
    assert_eq!(translate("show files"), "ls");
    assert_eq!(translate("xyz"), "xyz");
}

#[test]
fn tab_completion_examples() {
    let router = Router::default();
    let mut session = Session::default();
    let verbs = router.verbs();
    let mut editor = LineEditor::new();

    editor.set_buffer("p");
    assert_eq!(editor.complete(&mut session, &verbs), Completion::Replaced);
    assert_eq!(editor.buffer(), "projects/");

    editor.set_buffer("x");
    assert_eq!(editor.complete(&mut session, &verbs), Completion::None);
    assert_eq!(editor.buffer(), "x");

    editor.set_buffer("");
    assert_eq!(editor.complete(&mut session, &verbs), Completion::None);
    assert!(session.history.is_empty());
}

#[tokio::test]
async fn history_navigation_after_submits() {
    let router = Router::default();
    let mut session = Session::default();
    let mut editor = LineEditor::new();

    for line in ["ls", "pwd"] {
        editor.set_buffer(line);
        router.submit(&mut session, editor.buffer()).await.unwrap();
        editor.commit(&mut session);
    }

    editor.history_up(&mut session);
    editor.history_up(&mut session);
    assert_eq!(editor.buffer(), "ls");
    editor.history_up(&mut session);
    assert_eq!(editor.buffer(), "ls");
    editor.history_down(&mut session);
    assert_eq!(editor.buffer(), "pwd");
    editor.history_down(&mut session);
    assert_eq!(editor.buffer(), "");
}

#[tokio::test]
async fn unreachable_backend_serves_locally_without_complaint() {
    let mock = Arc::new(MockBackend::offline());
    let router = Router::with_backend(mock.clone());
    let mut session = Session::default();

    assert!(!router.check_health(&mut session).await);
    assert_eq!(
        router.submit(&mut session, "cat welcome.txt").await,
        Ok(Route::Local)
    );
    assert_eq!(outputs(&session), vec![WELCOME_TEXT]);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn backend_dropping_mid_session_falls_back() {
    let mock = Arc::new(MockBackend::online());
    mock.push_reply(Ok(CommandResponse::ok("remote ls")));
    let router = Router::with_backend(mock.clone());
    let mut session = Session::default();
    router.check_health(&mut session).await;

    router.submit(&mut session, "ls").await.unwrap();
    // No reply scripted: the mock now fails like a dead server.
    router.submit(&mut session, "read file welcome.txt").await.unwrap();

    assert_eq!(outputs(&session), vec!["remote ls", WELCOME_TEXT]);
    assert!(!session.backend_reachable);
}

#[tokio::test(start_paused = true)]
async fn top_then_exit_leaves_no_refresh_running() {
    let mock = Arc::new(MockBackend::online());
    mock.push_snapshot(vec![ProcessSample {
        pid: 42,
        user: "root".into(),
        cpu_percent: 3.0,
        mem_percent: 1.0,
        command: "kernel_task".into(),
    }]);
    mock.push_reply(Ok(CommandResponse::ok("before")));
    mock.push_reply(Ok(CommandResponse::ok("")));
    let router = Router::with_backend(mock.clone());
    let mut session = Session::default();
    router.check_health(&mut session).await;

    router.submit(&mut session, "echo before").await.unwrap();
    assert_eq!(router.submit(&mut session, "top").await, Ok(Route::Remote));
    assert!(session.monitor_active);
    assert!(session.history.is_empty());

    let mut monitor = MonitorLoop::new();
    monitor.start(SampleSource::Remote(mock.clone()), Duration::from_millis(2000));
    assert_eq!(monitor.next_update().await, Some(()));
    assert_eq!(monitor.view().processes[0].pid, 42);

    // Any key leaves monitor mode.
    session.monitor_active = false;
    monitor.stop();
    let calls = mock.process_calls();
    let history_len = session.history.len();

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(mock.process_calls(), calls);
    assert_eq!(session.history.len(), history_len);
    assert_eq!(monitor.next_update().await, None);
}

/// Backend whose command endpoint takes a while to answer.
struct SlowBackend;

#[async_trait]
impl BackendClient for SlowBackend {
    fn base_url(&self) -> &str {
        "slow://"
    }

    async fn check_health(&self) -> bool {
        true
    }

    async fn execute_command(
        &self,
        command: &str,
        _current_path: &str,
        _file_system: &FileTree,
    ) -> BackendResult<CommandResponse> {
        tokio::time::sleep(Duration::from_secs(1)).await;
        Ok(CommandResponse::ok(format!("slow {command}")))
    }

    async fn fetch_process_snapshot(&self) -> BackendResult<Vec<ProcessSample>> {
        Ok(Vec::new())
    }
}

#[tokio::test(start_paused = true)]
async fn second_submit_while_dispatching_is_rejected() {
    let router = Router::with_backend(Arc::new(SlowBackend));
    let mut first = Session::default();
    let mut second = Session::default();
    router.check_health(&mut first).await;
    router.check_health(&mut second).await;

    let (a, b) = tokio::join!(router.submit(&mut first, "ls"), async {
        tokio::task::yield_now().await;
        router.submit(&mut second, "pwd").await
    });

    assert_eq!(a, Ok(Route::Remote));
    assert_eq!(b, Err(RouterError::Busy));
    assert_eq!(first.last_output(), Some("slow ls"));
    assert!(second.history.is_empty());
    assert!(router.is_idle());
}

#[test]
fn vfs_errors_render_with_paths() {
    let session = Session::default();
    let err = session
        .fs
        .read_file(&VfsPath::parse("home/user/missing"))
        .unwrap_err();
    assert_eq!(err, VfsError::NotFound("/home/user/missing".into()));
    assert_eq!(err.to_string(), "no such file or directory: /home/user/missing");
}
