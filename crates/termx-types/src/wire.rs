//! Request and response bodies of the remote backend.
//!
//! ```text
//! GET  /api/health     -> any 2xx
//! POST /api/command    CommandRequest -> CommandResponse
//! GET  /api/processes  -> ProcessList
//! ```

use serde::{Deserialize, Serialize};

use crate::node::FileTree;
use crate::process::ProcessSample;

/// Body of `POST /api/command`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandRequest {
    pub command: String,
    /// Current path in wire form (no leading slash).
    pub current_path: String,
    pub file_system: FileTree,
}

/// Response of `POST /api/command`.
///
/// Absent `new_file_system` / `new_path` mean "unchanged".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(default)]
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_file_system: Option<FileTree>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CommandResponse {
    /// A successful response carrying only output text.
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            new_file_system: None,
            new_path: None,
            error: None,
        }
    }

    /// A response reporting `success: false`.
    pub fn failed(output: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::ok(output)
        }
    }

    /// Text to show for a failed response: output, else error, else a fallback.
    pub fn failure_text(&self) -> String {
        if !self.output.is_empty() {
            self.output.clone()
        } else if let Some(err) = self.error.as_deref().filter(|e| !e.is_empty()) {
            err.to_string()
        } else {
            "Unknown error".to_string()
        }
    }
}

/// Response of `GET /api/processes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessList {
    #[serde(default, deserialize_with = "crate::process::deserialize_rows")]
    pub processes: Vec<ProcessSample>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_optional_fields_default_to_none() {
        let resp: CommandResponse =
            serde_json::from_value(json!({ "success": true, "output": "hi" })).unwrap();
        assert_eq!(resp, CommandResponse::ok("hi"));
    }

    #[test]
    fn test_response_null_optionals() {
        let resp: CommandResponse = serde_json::from_value(json!({
            "success": false,
            "output": "",
            "new_path": null,
            "new_file_system": null,
            "error": "boom"
        }))
        .unwrap();
        assert!(!resp.success);
        assert_eq!(resp.failure_text(), "boom");
    }

    #[test]
    fn test_failure_text_fallback() {
        assert_eq!(CommandResponse::failed("").failure_text(), "Unknown error");
        assert_eq!(CommandResponse::failed("nope").failure_text(), "nope");
    }

    #[test]
    fn test_request_shape() {
        let req = CommandRequest {
            command: "ls".into(),
            current_path: "home/user".into(),
            file_system: FileTree::new(),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "command": "ls", "current_path": "home/user", "file_system": {} })
        );
    }

    #[test]
    fn test_process_list_skips_error_rows() {
        let list: ProcessList = serde_json::from_value(json!({
            "processes": [
                { "error": "access denied" },
                { "pid": 1, "user": "root", "cpu": 0.1, "mem": 0.2, "command": "init" }
            ]
        }))
        .unwrap();
        assert_eq!(list.processes.len(), 1);
        assert_eq!(list.processes[0].pid, 1);

        let failed: ProcessList =
            serde_json::from_value(json!({ "processes": [{ "error": "boom" }] })).unwrap();
        assert!(failed.processes.is_empty());
    }
}
