//! JSONL audit trail of hook activity.
//!
//! Every event is appended to a per-event file in the log directory
//! (`pre_tool_use.json`, `stop.json`, ...). Blocked commands additionally go
//! to `blocked.json`. Audit failures are logged and swallowed; they must
//! never fail the hook.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::warn;

use crate::domain::HookInput;

/// Append-only audit log.
pub struct AuditLog {
    dir: PathBuf,
}

/// One line of the per-event audit files.
#[derive(Serialize)]
struct AuditRecord<'a> {
    timestamp: String,
    event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cwd: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_input: Option<&'a serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_response: Option<&'a serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transcript_path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trigger: Option<&'a str>,
}

/// One line of `blocked.json`.
#[derive(Serialize)]
struct BlockedRecord<'a> {
    timestamp: String,
    reason: &'a str,
    command: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_id: Option<&'a str>,
}

impl AuditLog {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Append the event to its per-event JSONL file.
    /// Errors are downgraded to warnings.
    pub fn record(&self, input: &HookInput, raw: &serde_json::Value) {
        let record = AuditRecord {
            timestamp: timestamp(),
            event: input.event.to_string(),
            session_id: input.session_id.as_deref(),
            cwd: input.cwd.as_deref().and_then(|p| p.to_str()),
            tool_name: input.tool_name.as_deref(),
            tool_input: raw.get("tool_input"),
            tool_response: raw.get("tool_response"),
            transcript_path: input.transcript_path.as_deref().and_then(|p| p.to_str()),
            message: input.message.as_deref(),
            trigger: input.trigger.as_deref(),
        };

        if let Err(e) = self.append(input.event.log_file_name(), &record) {
            warn!("Failed to write audit record: {}", e);
        }
    }

    /// Append a blocked-command entry to `blocked.json`.
    pub fn record_blocked(&self, input: &HookInput, command: &str, reason: &str) {
        let record = BlockedRecord {
            timestamp: timestamp(),
            reason,
            command,
            session_id: input.session_id.as_deref(),
        };

        if let Err(e) = self.append("blocked.json", &record) {
            warn!("Failed to write blocked record: {}", e);
        }
    }

    fn append<T: Serialize>(&self, file_name: &str, record: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.dir.join(file_name))?;

        let line = serde_json::to_string(record)?;
        writeln!(file, "{}", line)?;

        Ok(())
    }
}

fn timestamp() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"))
}
