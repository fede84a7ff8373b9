//! Core domain types for hook input/output.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Lifecycle event reported by Claude Code via `hook_event_name`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum HookEvent {
    PreToolUse,
    PostToolUse,
    Notification,
    Stop,
    SubagentStop,
    PreCompact,
    /// Any event name this version does not know about.
    #[serde(other)]
    #[default]
    Other,
}

impl HookEvent {
    /// File name used for this event's JSONL audit log.
    pub fn log_file_name(&self) -> &'static str {
        match self {
            HookEvent::PreToolUse => "pre_tool_use.json",
            HookEvent::PostToolUse => "post_tool_use.json",
            HookEvent::Notification => "notification.json",
            HookEvent::Stop => "stop.json",
            HookEvent::SubagentStop => "subagent_stop.json",
            HookEvent::PreCompact => "pre_compact.json",
            HookEvent::Other => "other.json",
        }
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HookEvent::PreToolUse => "PreToolUse",
            HookEvent::PostToolUse => "PostToolUse",
            HookEvent::Notification => "Notification",
            HookEvent::Stop => "Stop",
            HookEvent::SubagentStop => "SubagentStop",
            HookEvent::PreCompact => "PreCompact",
            HookEvent::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Hook payload received from Claude Code on stdin.
///
/// All fields except the event name are optional because each event type
/// populates a different subset (Stop has no tool fields, Notification
/// carries `message`, PreCompact carries `trigger`, and so on).
#[derive(Debug, Clone, Deserialize)]
pub struct HookInput {
    /// Event type: "PreToolUse", "PostToolUse", "Stop", etc.
    #[serde(rename = "hook_event_name", default)]
    pub event: HookEvent,

    /// Tool name: "Bash", "Write", "Edit", "Read", etc.
    #[serde(default)]
    pub tool_name: Option<String>,

    /// Tool-specific input
    #[serde(default)]
    pub tool_input: Option<ToolInput>,

    /// Tool result, present on PostToolUse
    #[serde(default)]
    pub tool_response: Option<serde_json::Value>,

    /// Session identifier
    #[serde(default)]
    pub session_id: Option<String>,

    /// Working directory of the session
    #[serde(default)]
    pub cwd: Option<PathBuf>,

    /// Path to the session transcript (JSONL)
    #[serde(default)]
    pub transcript_path: Option<PathBuf>,

    /// Notification text, present on Notification events
    #[serde(default)]
    pub message: Option<String>,

    /// Compaction trigger ("manual" or "auto"), present on PreCompact
    #[serde(default)]
    pub trigger: Option<String>,

    /// Whether a stop hook is already running, present on Stop
    #[serde(default)]
    pub stop_hook_active: Option<bool>,
}

impl HookInput {
    /// The shell command under evaluation, if this is a Bash tool call.
    pub fn bash_command(&self) -> Option<&str> {
        if self.tool_name.as_deref() != Some("Bash") {
            return None;
        }
        match &self.tool_input {
            Some(ToolInput::Bash(bash)) => Some(&bash.command),
            _ => None,
        }
    }
}

/// Tool-specific input variants.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ToolInput {
    /// Bash command input
    Bash(BashInput),
    /// File operation input (Write, Edit, Read)
    File(FileOperationInput),
    /// Other/unknown tool input
    Other(serde_json::Value),
}

/// Bash command input.
#[derive(Debug, Clone, Deserialize)]
pub struct BashInput {
    /// Command to execute
    pub command: String,

    /// Optional command description supplied by the agent
    #[serde(default)]
    pub description: Option<String>,

    /// Optional timeout in milliseconds
    #[serde(default)]
    pub timeout: Option<u64>,
}

/// File operation input.
#[derive(Debug, Clone, Deserialize)]
pub struct FileOperationInput {
    /// File path
    pub file_path: String,

    /// Optional content (for Write/Edit)
    #[serde(default)]
    pub content: Option<String>,
}

/// Outcome of evaluating a hook event.
///
/// Evaluation returns this tagged result instead of relying on blanket
/// exception suppression, so the fail-open policy lives at the call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Permit the operation
    Allow,
    /// Refuse the operation, naming the rule that fired
    Block { reason: String },
}

impl Decision {
    pub fn block(reason: impl Into<String>) -> Self {
        Decision::Block {
            reason: reason.into(),
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, Decision::Block { .. })
    }
}

/// Permission decision written to stdout for Claude Code.
///
/// Only deny decisions are emitted; an allowed operation produces no output
/// and the host proceeds normally.
#[derive(Debug, Clone, Serialize)]
pub struct HookOutput {
    #[serde(rename = "permissionDecision")]
    pub decision: String,

    #[serde(rename = "permissionDecisionReason")]
    pub reason: String,
}

impl HookOutput {
    /// Build a deny output in the format the host expects.
    pub fn deny(reason: &str, command: &str) -> Self {
        Self {
            decision: "deny".to_string(),
            reason: format!(
                "BLOCKED: {reason}\nCommand: {command}\n\n\
                 This operation was blocked to prevent accidental damage to files or the system."
            ),
        }
    }
}
