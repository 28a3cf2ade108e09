//! Live process-table refresh.
//!
//! While monitor mode is on, a background task ticks at a fixed period and
//! produces a fresh process table: fetched from the backend when it is
//! being used, synthesized otherwise. Each table replaces the previous one
//! wholesale.
//!
//! ```text
//! MonitorLoop::start ──spawn──► ticker ─► sample ─► mpsc(1) ─► next_update
//! MonitorLoop::stop  ──abort──► (task gone, queued sample dropped)
//! ```

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use termx_types::ProcessSample;

use crate::backend::BackendClient;

const SIM_COMMANDS: &[&str] = &[
    "/bin/bash",
    "code",
    "chrome",
    "node",
    "docker",
    "figma_agent",
    "spotify",
    "slack",
    "kernel_task",
];
const SIM_USERS: &[&str] = &["root", "user", "system", "windowserver"];

/// Where samples come from.
#[derive(Clone)]
pub enum SampleSource {
    Remote(Arc<dyn BackendClient>),
    Simulated,
}

impl SampleSource {
    pub fn origin(&self) -> DataOrigin {
        match self {
            SampleSource::Remote(_) => DataOrigin::Real,
            SampleSource::Simulated => DataOrigin::Simulated,
        }
    }
}

impl std::fmt::Debug for SampleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleSource::Remote(b) => f.debug_tuple("Remote").field(&b.base_url()).finish(),
            SampleSource::Simulated => f.write_str("Simulated"),
        }
    }
}

/// Whether the table shows backend data or synthesized data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataOrigin {
    Real,
    #[default]
    Simulated,
}

/// What the monitor screen shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonitorView {
    pub processes: Vec<ProcessSample>,
    pub origin: DataOrigin,
    /// Tables received since the loop was started.
    pub ticks: u64,
}

/// The refresh task and the latest table it produced.
#[derive(Default)]
pub struct MonitorLoop {
    handle: Option<JoinHandle<()>>,
    updates: Option<mpsc::Receiver<Vec<ProcessSample>>>,
    view: MonitorView,
}

impl MonitorLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ticking every `period`. Restarts if already running.
    ///
    /// Must be called inside a tokio runtime. The first tick fires
    /// immediately.
    pub fn start(&mut self, source: SampleSource, period: Duration) {
        self.stop();
        tracing::debug!(?source, ?period, "starting monitor loop");

        let (tx, rx) = mpsc::channel(1);
        self.view = MonitorView {
            origin: source.origin(),
            ..MonitorView::default()
        };
        self.updates = Some(rx);
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut rng = StdRng::from_entropy();
            loop {
                ticker.tick().await;
                let processes = match &source {
                    SampleSource::Remote(backend) => match backend.fetch_process_snapshot().await {
                        Ok(processes) => processes,
                        Err(e) => {
                            tracing::warn!(error = %e, "process snapshot failed");
                            continue;
                        }
                    },
                    SampleSource::Simulated => simulate_processes(&mut rng),
                };
                if processes.is_empty() {
                    // Empty means "no update this tick".
                    continue;
                }
                if tx.send(processes).await.is_err() {
                    break;
                }
            }
        }));
    }

    /// Cancel the task and drop any table it already queued.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!("monitor loop stopped");
        }
        self.updates = None;
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Wait for the next table and install it in the view.
    ///
    /// Returns `None` at once when the loop is not running.
    pub async fn next_update(&mut self) -> Option<()> {
        let processes = self.updates.as_mut()?.recv().await?;
        self.view.processes = processes;
        self.view.ticks += 1;
        Some(())
    }

    pub fn view(&self) -> &MonitorView {
        &self.view
    }
}

impl Drop for MonitorLoop {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// A plausible random process table: 5 to 10 rows.
pub fn simulate_processes<R: Rng + ?Sized>(rng: &mut R) -> Vec<ProcessSample> {
    let count = rng.gen_range(5..=10);
    (0..count)
        .map(|_| ProcessSample {
            pid: rng.gen_range(10_000..=99_999),
            user: SIM_USERS.choose(&mut *rng).copied().unwrap_or("user").to_string(),
            cpu_percent: round1(rng.gen_range(0.0..=25.0)),
            mem_percent: round1(rng.gen_range(0.0..=5.0)),
            command: SIM_COMMANDS.choose(&mut *rng).copied().unwrap_or("init").to_string(),
        })
        .collect()
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
