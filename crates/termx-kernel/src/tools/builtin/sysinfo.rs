//! free, df, uptime, ps, iostat, vmstat: Simulated system reports.
//!
//! When commands run locally there is no real machine to inspect, so these
//! render randomized figures in the same column layout the backend uses.
//! Every report ends with a line saying the data is simulated.

use async_trait::async_trait;
use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::monitor::simulate_processes;
use crate::tools::{ExecContext, Tool, ToolOutput, ToolSchema};

const GIB: u64 = 1024 * 1024 * 1024;
const SIMULATED_NOTE: &str = "(simulated data: backend not in use)";

/// Which report a [`SysInfo`] tool renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysReport {
    Free,
    Df,
    Uptime,
    Ps,
    Iostat,
    Vmstat,
}

impl SysReport {
    pub const ALL: [SysReport; 6] = [
        SysReport::Free,
        SysReport::Df,
        SysReport::Uptime,
        SysReport::Ps,
        SysReport::Iostat,
        SysReport::Vmstat,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SysReport::Free => "free",
            SysReport::Df => "df",
            SysReport::Uptime => "uptime",
            SysReport::Ps => "ps",
            SysReport::Iostat => "iostat",
            SysReport::Vmstat => "vmstat",
        }
    }

    fn description(self) -> &'static str {
        match self {
            SysReport::Free => "Display memory usage (real system data if backend connected).",
            SysReport::Df => "Display disk space usage (real system data if backend connected).",
            SysReport::Uptime => "Show system uptime and load (real system data if backend connected).",
            SysReport::Ps => "Show running processes (real system data if backend connected).",
            SysReport::Iostat => "Show I/O statistics (real system data if backend connected).",
            SysReport::Vmstat => "Show virtual memory statistics (real system data if backend connected).",
        }
    }

    /// Render the report with figures drawn from `rng`.
    pub fn render<R: Rng>(self, rng: &mut R) -> String {
        let body = match self {
            SysReport::Free => render_free(rng),
            SysReport::Df => render_df(rng),
            SysReport::Uptime => render_uptime(rng),
            SysReport::Ps => render_ps(rng),
            SysReport::Iostat => render_iostat(rng),
            SysReport::Vmstat => render_vmstat(rng),
        };
        format!("{}\n{}", body.trim_end(), SIMULATED_NOTE)
    }
}

/// One system report verb.
pub struct SysInfo {
    report: SysReport,
}

impl SysInfo {
    pub fn new(report: SysReport) -> Self {
        Self { report }
    }
}

#[async_trait]
impl Tool for SysInfo {
    fn name(&self) -> &str {
        self.report.name()
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(self.report.name(), self.report.description())
    }

    async fn execute(&self, _args: &[String], _ctx: &mut ExecContext<'_>) -> ToolOutput {
        let mut rng = StdRng::from_entropy();
        ToolOutput::Text(self.report.render(&mut rng))
    }
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1}{}", value, UNITS[unit])
}

fn render_free<R: Rng>(rng: &mut R) -> String {
    let total = 16 * GIB;
    let used = rng.gen_range(4 * GIB..12 * GIB);
    let cache = rng.gen_range(GIB..3 * GIB);
    let free = total - used - cache;
    let swap_total = 2 * GIB;
    let swap_used = rng.gen_range(0..GIB / 2);
    let mut out = format!(
        "{:<12} {:<12} {:<12} {:<12} {:<12} {:<12} {:<12}\n",
        "", "total", "used", "free", "shared", "buff/cache", "available"
    );
    out += &format!(
        "{:<12} {:<12} {:<12} {:<12} {:<12} {:<12} {:<12}\n",
        "Mem:",
        format_bytes(total),
        format_bytes(used),
        format_bytes(free),
        "0B",
        format_bytes(cache),
        format_bytes(free + cache),
    );
    out += &format!(
        "{:<12} {:<12} {:<12} {:<12} {:<12} {:<12} {:<12}\n",
        "Swap:",
        format_bytes(swap_total),
        format_bytes(swap_used),
        format_bytes(swap_total - swap_used),
        "0B",
        "0B",
        "0B",
    );
    out
}

fn render_df<R: Rng>(rng: &mut R) -> String {
    let total_kb: u64 = 500 * 1024 * 1024;
    let percent = rng.gen_range(30..=80u64);
    let used_kb = total_kb / 100 * percent;
    let mut out = format!(
        "{:<20} {:<12} {:<12} {:<12} {:<8} {:<12}\n",
        "Filesystem", "1K-blocks", "Used", "Available", "Use%", "Mounted on"
    );
    out += &format!(
        "{:<20} {:<12} {:<12} {:<12} {:<8} {:<12}\n",
        "/dev/root",
        total_kb,
        used_kb,
        total_kb - used_kb,
        format!("{}%", percent),
        "/"
    );
    out
}

fn render_uptime<R: Rng>(rng: &mut R) -> String {
    let days = rng.gen_range(0..30);
    let hours = rng.gen_range(0..24);
    let minutes = rng.gen_range(0..60);
    let load: [f64; 3] = [
        rng.gen_range(0.0..4.0),
        rng.gen_range(0.0..4.0),
        rng.gen_range(0.0..4.0),
    ];
    format!(
        " {} up {} days, {}:{:02}, 1 user, load average: {:.2}, {:.2}, {:.2}\n",
        Local::now().format("%H:%M:%S"),
        days,
        hours,
        minutes,
        load[0],
        load[1],
        load[2]
    )
}

fn render_ps<R: Rng>(rng: &mut R) -> String {
    let mut out = format!(
        "{:<8} {:<10} {:<6} {:<6} {:<6} {:<8} {:<30}\n",
        "PID", "USER", "%CPU", "%MEM", "STAT", "START", "COMMAND"
    );
    for p in simulate_processes(rng) {
        out += &format!(
            "{:<8} {:<10} {:<6} {:<6} {:<6} {:<8} {:<30}\n",
            p.pid, p.user, p.cpu_percent, p.mem_percent, "S", "00:00", p.command
        );
    }
    out
}

fn render_iostat<R: Rng>(rng: &mut R) -> String {
    let mut out = format!(
        "Linux termx {} x86_64 (simulated)\n\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    out += &format!(
        "{:<10} {:<8} {:<12} {:<12} {:<12} {:<12}\n",
        "Device", "tps", "kB_read/s", "kB_wrtn/s", "kB_read", "kB_wrtn"
    );
    out += &format!(
        "{:<10} {:<8.2} {:<12.2} {:<12.2} {:<12} {:<12}\n",
        "sda",
        rng.gen_range(0.0..50.0),
        rng.gen_range(0.0..500.0),
        rng.gen_range(0.0..500.0),
        rng.gen_range(100_000..10_000_000u64),
        rng.gen_range(100_000..10_000_000u64),
    );
    out
}

fn render_vmstat<R: Rng>(rng: &mut R) -> String {
    let free_mb = rng.gen_range(1024..8192u64);
    let buff_mb = rng.gen_range(64..512u64);
    let cache_mb = rng.gen_range(512..4096u64);
    let us: f64 = rng.gen_range(0.0..40.0);
    let sy: f64 = rng.gen_range(0.0..15.0);
    let id = (100.0 - us - sy).max(0.0);
    let mut out =
        String::from("procs -----------memory---------- ---swap-- -----io---- -system-- ------cpu-----\n");
    out += " r  b   swpd   free   buff  cache   si   so    bi    bo   in   cs us sy id wa st\n";
    out += &format!(
        " 0  0   {:>6} {:>6} {:>6} {:>6}   0    0     0     0   10    5 {:.1} {:.1} {:.1}  0.0  0.0\n",
        0, free_mb, buff_mb, cache_mb, us, sy, id
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512.0B");
        assert_eq!(format_bytes(16 * GIB), "16.0GB");
        assert_eq!(format_bytes(1536), "1.5KB");
    }

    #[test]
    fn test_reports_are_labelled_simulated() {
        let mut rng = StdRng::seed_from_u64(1);
        for report in SysReport::ALL {
            let text = report.render(&mut rng);
            assert!(text.ends_with(SIMULATED_NOTE), "{} not labelled", report.name());
        }
    }

    #[test]
    fn test_free_layout() {
        let mut rng = StdRng::seed_from_u64(2);
        let text = SysReport::Free.render(&mut rng);
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].contains("total"));
        assert!(lines[1].starts_with("Mem:"));
        assert!(lines[2].starts_with("Swap:"));
    }

    #[test]
    fn test_ps_has_header_and_rows() {
        let mut rng = StdRng::seed_from_u64(3);
        let text = SysReport::Ps.render(&mut rng);
        assert!(text.starts_with("PID"));
        // header + 5..=10 rows + note
        assert!(text.lines().count() >= 7);
    }

    #[tokio::test]
    async fn test_tool_names_match_reports() {
        let mut session = Session::default();
        let mut ctx = ExecContext::new(&mut session);
        let tool = SysInfo::new(SysReport::Df);
        assert_eq!(tool.name(), "df");
        let out = tool.execute(&[], &mut ctx).await;
        assert!(out.content().unwrap().starts_with("Filesystem"));
    }
}
