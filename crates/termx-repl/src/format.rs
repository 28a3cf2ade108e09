//! Plain-text rendering of the console.
//!
//! Two screens: the history view (echoed inputs, outputs, prompt) and the
//! monitor view (process table with a header). Both produce lines; the
//! caller decides how many fit.

use chrono::{DateTime, Local};

use termx_kernel::{DataOrigin, MonitorView, Session};
use termx_types::HistoryEntry;

/// Connectivity tag shown before the prompt.
pub fn indicator(session: &Session) -> &'static str {
    if session.backend_reachable {
        "[online]"
    } else {
        "[offline]"
    }
}

/// The input line: `[online] /home/user $ buffer`.
pub fn prompt(session: &Session, buffer: &str) -> String {
    format!("{} {} $ {}", indicator(session), session.cwd, buffer)
}

/// History entries as display lines, oldest first.
pub fn history_lines(history: &[HistoryEntry]) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in history {
        match entry {
            HistoryEntry::Input { raw, path } => lines.push(format!("/{} $ {}", path, raw)),
            HistoryEntry::Output { content } => {
                lines.extend(content.lines().map(str::to_string));
            }
        }
    }
    lines
}

/// History followed by the prompt.
pub fn history_screen(session: &Session, buffer: &str) -> Vec<String> {
    let mut lines = history_lines(&session.history);
    lines.push(prompt(session, buffer));
    lines
}

/// The live process table.
pub fn monitor_screen(view: &MonitorView, now: DateTime<Local>) -> Vec<String> {
    let origin = match view.origin {
        DataOrigin::Real => "Real System Data",
        DataOrigin::Simulated => "Simulated Data",
    };
    let mut lines = vec![
        format!(
            "top - {}  Tasks: {} total  [{}]",
            now.format("%H:%M:%S"),
            view.processes.len(),
            origin
        ),
        "Press any key to quit.".to_string(),
        String::new(),
        format!(
            "{:>8} {:<10} {:>6} {:>6} {}",
            "PID", "USER", "%CPU", "%MEM", "COMMAND"
        ),
    ];
    if view.processes.is_empty() {
        lines.push("(waiting for data)".to_string());
    }
    for p in &view.processes {
        let command: String = p.command.chars().take(20).collect();
        lines.push(
            format!(
                "{:>8} {:<10} {:>6.1} {:>6.1} {:<20}",
                p.pid, p.user, p.cpu_percent, p.mem_percent, command
            )
            .trim_end()
            .to_string(),
        );
    }
    lines
}

/// Keep only the last `height` lines.
pub fn fit(lines: Vec<String>, height: usize) -> Vec<String> {
    let skip = lines.len().saturating_sub(height);
    lines.into_iter().skip(skip).collect()
}
