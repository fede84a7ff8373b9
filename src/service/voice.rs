//! Voice notifications via a local TTS program.
//!
//! Notification messages from the host are classified into a context
//! (permission request, error, completion, ...) and a short phrase is spoken
//! by spawning the configured program. Speech failures never fail the hook.

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::config::VoiceConfig;
use crate::domain::HookInput;
use crate::service::phrases;

/// Classified notification context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationContext {
    /// The host is asking permission to run a tool
    PermissionRequest { tool: String },
    /// Error or warning text
    Error,
    /// Explicit completion message
    Completion,
    /// The host is waiting for user input
    InputRequired,
    /// Idle/status message
    StatusUpdate,
    /// No specific message; the transcript shows a recent tool call
    ToolCompletion { tool: String },
    /// Anything else with message text
    General,
    /// Empty notification
    Waiting,
}

const PERMISSION_MARKERS: &[&str] = &[
    "needs your permission to use",
    "needs permission to use",
    "wants to use",
    "requesting permission",
    "confirm to proceed",
    "needs your confirmation",
    "allow claude to",
];

const ERROR_MARKERS: &[&str] = &[
    "error occurred",
    "failed to",
    "warning:",
    "could not",
    "unable to",
    "permission denied",
    "access denied",
    "file not found",
    "network error",
];

const COMPLETION_MARKERS: &[&str] = &[
    "task completed",
    "operation finished",
    "successfully completed",
    "completed successfully",
];

const INPUT_MARKERS: &[&str] = &[
    "waiting for input",
    "please respond",
    "your input needed",
    "waiting for your response",
];

const STATUS_MARKERS: &[&str] = &["ready for", "standing by", "available", "idle", "waiting"];

/// Classify a Notification payload.
///
/// Message text is checked against marker phrases first; when nothing
/// matches, the transcript is scanned for the most recent tool call so the
/// spoken phrase can still name what just happened.
pub fn detect_context(message: &str, transcript_path: Option<&Path>) -> NotificationContext {
    let lowered = message.to_lowercase();

    if PERMISSION_MARKERS.iter().any(|m| lowered.contains(m)) {
        return NotificationContext::PermissionRequest {
            tool: extract_tool_name(message),
        };
    }

    if ERROR_MARKERS.iter().any(|m| lowered.contains(m)) {
        return NotificationContext::Error;
    }

    if COMPLETION_MARKERS.iter().any(|m| lowered.contains(m)) {
        return NotificationContext::Completion;
    }

    if INPUT_MARKERS.iter().any(|m| lowered.contains(m)) {
        return NotificationContext::InputRequired;
    }

    if STATUS_MARKERS.iter().any(|m| lowered.contains(m)) {
        return NotificationContext::StatusUpdate;
    }

    if let Some(tool) = transcript_path.and_then(last_tool_use) {
        return NotificationContext::ToolCompletion { tool };
    }

    if message.trim().is_empty() {
        NotificationContext::Waiting
    } else {
        NotificationContext::General
    }
}

/// Pull the tool name out of a permission message like
/// "Claude needs your permission to use Bash".
fn extract_tool_name(message: &str) -> String {
    for marker in ["use ", "with "] {
        if let Some(rest) = message.rsplit(marker).next() {
            if rest != message {
                let tool = rest.trim().trim_end_matches(['?', '.']);
                if !tool.is_empty() {
                    return tool.to_string();
                }
            }
        }
    }
    "unknown tool".to_string()
}

/// Scan the session transcript bottom-up for the most recent PostToolUse
/// record and return its tool name.
fn last_tool_use(transcript: &Path) -> Option<String> {
    let content = fs::read_to_string(transcript).ok()?;

    for line in content.lines().rev() {
        let record: serde_json::Value = match serde_json::from_str(line.trim()) {
            Ok(v) => v,
            Err(_) => continue,
        };

        if record.get("hook_event_name").and_then(|v| v.as_str()) == Some("PostToolUse") {
            if let Some(tool) = record.get("tool_name").and_then(|v| v.as_str()) {
                if !tool.is_empty() {
                    return Some(tool.to_string());
                }
            }
        }
    }

    None
}

/// Speaks notification phrases via the configured TTS program.
pub struct VoiceNotifier {
    config: VoiceConfig,
}

impl VoiceNotifier {
    pub fn new(config: VoiceConfig) -> Self {
        Self { config }
    }

    /// Handle a Notification event.
    pub fn notify(&self, input: &HookInput) {
        if !self.config.enabled {
            return;
        }

        let message = input.message.as_deref().unwrap_or("");
        let context = detect_context(message, input.transcript_path.as_deref());
        debug!("Notification context: {:?}", context);

        let text = match context {
            NotificationContext::PermissionRequest { tool } => phrases::permission(&tool),
            NotificationContext::Error => phrases::error(),
            NotificationContext::Completion => phrases::general(),
            NotificationContext::InputRequired => phrases::waiting(),
            NotificationContext::StatusUpdate => phrases::waiting(),
            NotificationContext::ToolCompletion { tool } => phrases::completion(&tool),
            NotificationContext::General => phrases::general(),
            NotificationContext::Waiting => phrases::waiting(),
        };

        self.speak(&text);
    }

    /// Handle session end.
    pub fn notify_stop(&self, context_hint: &str) {
        if self.config.enabled {
            self.speak(&phrases::session_end(context_hint));
        }
    }

    pub fn notify_subagent_stop(&self) {
        if self.config.enabled {
            self.speak(&phrases::subagent_end());
        }
    }

    /// Handle PreCompact; trigger is "manual" or "auto".
    pub fn notify_compact(&self, trigger: &str) {
        if self.config.enabled {
            self.speak(&phrases::compact(trigger));
        }
    }

    pub fn notify_blocked(&self) {
        if self.config.enabled {
            self.speak(&phrases::blocked());
        }
    }

    /// Spawn the TTS program without waiting for it. Each configured argument
    /// has "{text}" substituted; if no argument carries the placeholder, the
    /// phrase is appended as the last argument.
    fn speak(&self, text: &str) {
        let mut args: Vec<String> = Vec::with_capacity(self.config.args.len() + 1);
        let mut substituted = false;

        for arg in &self.config.args {
            if arg.contains("{text}") {
                args.push(arg.replace("{text}", text));
                substituted = true;
            } else {
                args.push(arg.clone());
            }
        }

        if !substituted {
            args.push(text.to_string());
        }

        let result = Command::new(&self.config.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match result {
            Ok(_) => debug!("Speaking: {}", text),
            Err(e) => warn!("Failed to spawn TTS program '{}': {}", self.config.program, e),
        }
    }
}
