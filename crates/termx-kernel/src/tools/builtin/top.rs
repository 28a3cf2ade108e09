//! top, htop: Live process table.

use async_trait::async_trait;

use crate::tools::{ExecContext, Tool, ToolOutput, ToolSchema};

/// Enters monitor mode. Registered as both `top` and `htop`.
pub struct Top {
    name: &'static str,
}

impl Top {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[async_trait]
impl Tool for Top {
    fn name(&self) -> &str {
        self.name
    }

    fn schema(&self) -> ToolSchema {
        let description = if self.name == "htop" {
            "Enhanced process viewer (real system data if backend connected)."
        } else {
            "Display processor activity (real system data if backend connected)."
        };
        ToolSchema::new(self.name, description)
    }

    async fn execute(&self, _args: &[String], _ctx: &mut ExecContext<'_>) -> ToolOutput {
        ToolOutput::EnterMonitor
    }
}
