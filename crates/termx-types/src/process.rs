//! Process-table samples shown by the monitor view.

use serde::{Deserialize, Deserializer, Serialize};

/// One row of the process table.
///
/// Deserialization is lenient about field names because the backend reports
/// real processes (`username`, `cpu_percent`, `memory_percent`) and simulated
/// ones (`user`, `cpu`, `mem`), sometimes with percentages as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawProcess")]
pub struct ProcessSample {
    pub pid: u32,
    pub user: String,
    pub cpu_percent: f64,
    pub mem_percent: f64,
    pub command: String,
}

/// A number that may arrive as a JSON number or a numeric string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Lenient {
    Number(f64),
    Text(String),
}

impl Lenient {
    fn value(&self) -> f64 {
        match self {
            Lenient::Number(n) => *n,
            Lenient::Text(s) => s.trim().parse().unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawProcess {
    pid: Option<u32>,
    user: Option<String>,
    username: Option<String>,
    name: Option<String>,
    cpu_percent: Option<Lenient>,
    cpu: Option<Lenient>,
    memory_percent: Option<Lenient>,
    mem_percent: Option<Lenient>,
    mem: Option<Lenient>,
    command: Option<String>,
}

impl From<RawProcess> for ProcessSample {
    fn from(raw: RawProcess) -> Self {
        let percent = |options: [Option<&Lenient>; 3]| {
            options
                .into_iter()
                .flatten()
                .next()
                .map(Lenient::value)
                .unwrap_or(0.0)
        };
        let cpu_percent = percent([raw.cpu_percent.as_ref(), raw.cpu.as_ref(), None]);
        let mem_percent = percent([
            raw.memory_percent.as_ref(),
            raw.mem_percent.as_ref(),
            raw.mem.as_ref(),
        ]);
        let command = raw
            .command
            .or_else(|| raw.name.clone())
            .unwrap_or_default();
        let user = raw
            .user
            .or(raw.username)
            .or(raw.name)
            .unwrap_or_else(|| "unknown".to_string());
        Self {
            pid: raw.pid.unwrap_or_default(),
            user,
            cpu_percent,
            mem_percent,
            command,
        }
    }
}

/// A process list, skipping rows without a `pid`. The backend reports a
/// failed scan as a single `{"error": ...}` row.
pub(crate) fn deserialize_rows<'de, D>(deserializer: D) -> Result<Vec<ProcessSample>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = Vec::<RawProcess>::deserialize(deserializer)?;
    Ok(rows
        .into_iter()
        .filter(|row| row.pid.is_some())
        .map(ProcessSample::from)
        .collect())
}
