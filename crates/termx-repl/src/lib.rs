//! termx-repl: the interactive termx console.
//!
//! [`Console`] ties the kernel pieces together: a [`Session`], the
//! [`Router`] that dispatches submitted lines, a [`LineEditor`] and the
//! [`MonitorLoop`] behind `top`. [`run`] drives it from a raw-mode terminal;
//! [`run_command`] executes one line and returns the rendered output.

pub mod event;
pub mod format;

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::{cursor, queue, style, terminal};
use futures::StreamExt;

use termx_client::HttpBackend;
use termx_kernel::tools::builtin_registry;
use termx_kernel::{
    BackendClient, Key, LineEditor, MonitorLoop, Router, RouterError, SampleSource,
    Session, TerminalConfig,
};
use termx_types::HistoryEntry;

use event::AppEvent;

/// One console run: state plus the components acting on it.
pub struct Console {
    session: Session,
    router: Router,
    editor: LineEditor,
    monitor: MonitorLoop,
    config: TerminalConfig,
    running: bool,
}

impl Console {
    pub fn new(config: TerminalConfig, backend: Option<Arc<dyn BackendClient>>) -> Self {
        let mut session = Session::new(config.home_path());
        session.use_backend = config.use_backend;
        Self {
            session,
            router: Router::new(builtin_registry(), backend),
            editor: LineEditor::new(),
            monitor: MonitorLoop::new(),
            config,
            running: true,
        }
    }

    /// A console talking to the backend at `config.api_url`.
    pub fn with_http_backend(config: TerminalConfig) -> Self {
        let backend = HttpBackend::new(&config.api_url, config.request_timeout());
        tracing::debug!(url = %config.api_url, "using HTTP backend");
        Self::new(config, Some(Arc::new(backend)))
    }

    /// Probe the backend and show the welcome banner.
    pub async fn start(&mut self) {
        self.router.check_health(&mut self.session).await;
        self.session.push_welcome();
    }

    /// Apply one key press.
    ///
    /// While the monitor is showing, any key leaves it and is consumed.
    pub async fn handle_key(&mut self, key: Key) {
        if self.session.monitor_active {
            self.session.monitor_active = false;
            self.sync_monitor();
            return;
        }

        match key {
            Key::Enter => {
                let line = self.editor.buffer().to_string();
                self.submit(&line).await;
                self.editor.commit(&mut self.session);
            }
            Key::Tab => {
                let verbs = self.router.verbs();
                let completion = self.editor.complete(&mut self.session, &verbs);
                tracing::trace!(?completion, "tab");
            }
            Key::Up => self.editor.history_up(&mut self.session),
            Key::Down => self.editor.history_down(&mut self.session),
            Key::Char(c) => self.editor.insert(c),
            Key::Backspace => self.editor.backspace(),
            Key::Other => {}
        }
    }

    /// Dispatch one line and bring the monitor in line with the session.
    pub async fn submit(&mut self, line: &str) {
        match self.router.submit(&mut self.session, line).await {
            Ok(route) => tracing::debug!(?route, "line handled"),
            Err(RouterError::Busy) => tracing::warn!("dispatch already in flight, line dropped"),
        }
        self.sync_monitor();
    }

    /// Start or stop the refresh loop to match `monitor_active`.
    pub fn sync_monitor(&mut self) {
        if !self.session.monitor_active {
            if self.monitor.is_running() {
                self.monitor.stop();
            }
            return;
        }
        if self.monitor.is_running() {
            return;
        }
        match self.router.backend() {
            Some(backend) if self.session.wants_remote() => self.monitor.start(
                SampleSource::Remote(Arc::clone(backend)),
                self.config.remote_interval(),
            ),
            _ => self
                .monitor
                .start(SampleSource::Simulated, self.config.local_interval()),
        }
    }

    /// Wait for the next process table. `None` when the monitor is off.
    pub async fn next_update(&mut self) -> Option<()> {
        self.monitor.next_update().await
    }

    pub fn monitor_running(&self) -> bool {
        self.monitor.is_running()
    }

    /// Lines for the current screen, most recent last.
    pub fn screen(&self) -> Vec<String> {
        if self.session.monitor_active {
            format::monitor_screen(self.monitor.view(), chrono::Local::now())
        } else {
            format::history_screen(&self.session, self.editor.buffer())
        }
    }

    pub fn quit(&mut self) {
        self.monitor.stop();
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    pub fn router(&self) -> &Router {
        &self.router
    }
}

/// Raw mode plus alternate screen, restored on drop and on panic.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_terminal();
            original_hook(info);
        }));

        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        crossterm::execute!(std::io::stdout(), terminal::EnterAlternateScreen)
            .context("Failed to enter alternate screen")?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
        let _ = std::panic::take_hook();
    }
}

fn restore_terminal() {
    let _ = terminal::disable_raw_mode();
    let _ = crossterm::execute!(
        std::io::stdout(),
        terminal::LeaveAlternateScreen,
        cursor::Show,
    );
}

fn draw(console: &Console) -> Result<()> {
    let (_, rows) = terminal::size().unwrap_or((80, 24));
    let lines = format::fit(console.screen(), usize::from(rows.max(1)));

    let mut stdout = std::io::stdout();
    queue!(
        stdout,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0),
        style::Print(lines.join("\r\n")),
    )?;
    if console.session.monitor_active {
        queue!(stdout, cursor::Hide)?;
    } else {
        queue!(stdout, cursor::Show)?;
    }
    stdout.flush()?;
    Ok(())
}

enum Step {
    Event(AppEvent),
    Refreshed,
    Closed,
}

/// Run the interactive console until Ctrl-C, Ctrl-D or end of input.
pub fn run(config: TerminalConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;
    runtime.block_on(run_interactive(config))
}

async fn run_interactive(config: TerminalConfig) -> Result<()> {
    let mut console = Console::with_http_backend(config);
    console.start().await;

    let _guard = TerminalGuard::enter()?;
    let mut events = crossterm::event::EventStream::new();

    while console.is_running() {
        draw(&console)?;

        let step = tokio::select! {
            next = events.next() => match next {
                Some(Ok(ev)) => Step::Event(event::classify(ev)),
                Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                None => Step::Closed,
            },
            Some(()) = console.next_update(), if console.monitor_running() => Step::Refreshed,
        };

        match step {
            Step::Event(AppEvent::Key(key)) => console.handle_key(key).await,
            Step::Event(AppEvent::Quit) | Step::Closed => console.quit(),
            Step::Event(AppEvent::Redraw) | Step::Refreshed => {}
        }
    }
    Ok(())
}

/// Execute one line and return what the console would have shown.
///
/// `top` and `htop` render a single process table.
pub fn run_command(config: TerminalConfig, line: &str) -> Result<String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;
    runtime.block_on(async {
        let mut console = Console::with_http_backend(config);
        Ok(execute_once(&mut console, line).await)
    })
}

/// Probe, submit `line` and collect the outputs it produced.
pub async fn execute_once(console: &mut Console, line: &str) -> String {
    console.router.check_health(&mut console.session).await;
    let before = console.session.history.len();
    console.submit(line).await;

    if console.session.monitor_active {
        let wait = console.config.remote_interval() + console.config.request_timeout();
        if tokio::time::timeout(wait, console.next_update()).await.is_err() {
            tracing::warn!("no process table within {:?}", wait);
        }
        let lines = format::monitor_screen(console.monitor.view(), chrono::Local::now());
        console.quit();
        return lines.join("\n");
    }

    console
        .session
        .history
        .iter()
        .skip(before.min(console.session.history.len()))
        .filter_map(HistoryEntry::as_output)
        .collect::<Vec<_>>()
        .join("\n")
}
