//! backend: Inspect and control remote dispatch.
//!
//! ```text
//! backend          status, API URL and mode
//! backend status   connectivity only
//! backend connect  re-run the health check
//! backend on|off   enable or disable remote dispatch
//! ```

use async_trait::async_trait;

use crate::tools::{ExecContext, Tool, ToolOutput, ToolSchema};

const USAGE: &str = "Usage: backend [status|connect|on|off]";

/// Backend tool. Always runs locally.
pub struct Backend;

fn status_word(reachable: bool) -> &'static str {
    if reachable { "connected" } else { "disconnected" }
}

#[async_trait]
impl Tool for Backend {
    fn name(&self) -> &str {
        "backend"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            "backend",
            "Backend management commands (status, connect, on, off).",
        )
    }

    async fn execute(&self, args: &[String], ctx: &mut ExecContext<'_>) -> ToolOutput {
        let session = &mut *ctx.session;
        match args.first().map(String::as_str) {
            None => {
                let url = ctx
                    .backend
                    .as_ref()
                    .map(|b| b.base_url().to_string())
                    .unwrap_or_else(|| "(none)".to_string());
                ToolOutput::Text(format!(
                    "Backend Status: {}\nAPI URL: {}\nUse Backend: {}",
                    status_word(session.backend_reachable),
                    url,
                    if session.use_backend { "yes" } else { "no" }
                ))
            }
            Some("status") => ToolOutput::Text(format!(
                "Backend Status: {}",
                status_word(session.backend_reachable)
            )),
            Some("connect") => {
                let Some(backend) = ctx.backend.clone() else {
                    return ToolOutput::failure("backend: no backend configured");
                };
                let reachable = backend.check_health().await;
                if reachable != session.backend_reachable {
                    tracing::info!(reachable, url = backend.base_url(), "backend connectivity changed");
                }
                session.backend_reachable = reachable;
                ToolOutput::Text(format!("Backend Status: {}", status_word(reachable)))
            }
            Some("on") => {
                session.use_backend = true;
                tracing::info!("backend mode enabled");
                ToolOutput::text("Backend mode enabled")
            }
            Some("off") => {
                session.use_backend = false;
                tracing::info!("local mode enabled");
                ToolOutput::text("Local mode enabled")
            }
            Some(_) => ToolOutput::failure(USAGE),
        }
    }
}
