//! Hook processing service.

use std::io::{self, Read, Write};

use anyhow::Result;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::domain::{CommitGuard, Decision, HookEvent, HookInput, HookOutput, SafetyFilter};
use crate::service::audit::AuditLog;
use crate::service::checkpoint::CheckpointService;
use crate::service::voice::VoiceNotifier;

/// Service for processing hook events.
pub struct HookService {
    filter: SafetyFilter,
    commit_guard: CommitGuard,
    audit: AuditLog,
    voice: VoiceNotifier,
    checkpoint: CheckpointService,
}

impl HookService {
    /// Create a new HookService from configuration.
    pub fn new(config: Config) -> Result<Self> {
        let filter = SafetyFilter::from_config(&config)?;

        let banned = if config.safety.blocked_attributions.is_empty() {
            CommitGuard::default_banned()
        } else {
            config.safety.blocked_attributions.clone()
        };
        let commit_guard = CommitGuard::new(config.safety.commit_guard, banned);

        let audit = AuditLog::new(config.log_path.clone());
        let voice = VoiceNotifier::new(config.voice.clone());
        let checkpoint = CheckpointService::new(config.checkpoint.clone());

        Ok(Self {
            filter,
            commit_guard,
            audit,
            voice,
            checkpoint,
        })
    }

    /// Process one hook event from stdin.
    ///
    /// Reads the JSON payload, evaluates it, and writes a deny decision to
    /// stdout when a command is blocked. An allowed operation produces no
    /// output. The process always exits 0: a broken payload or an internal
    /// error must never wedge the agent, so failures are logged and the
    /// operation is allowed through (fail-open).
    pub fn run(&self) -> Result<()> {
        let mut raw = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut raw) {
            error!("Failed to read stdin: {}", e);
            return Ok(());
        }

        if raw.trim().is_empty() {
            warn!("No input received from stdin");
            return Ok(());
        }

        debug!("Received input: {}", raw);

        let payload: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                error!("Failed to parse input: {}", e);
                return Ok(());
            }
        };

        let input: HookInput = match serde_json::from_value(payload.clone()) {
            Ok(input) => input,
            Err(e) => {
                error!("Failed to interpret payload: {}", e);
                return Ok(());
            }
        };

        self.audit.record(&input, &payload);

        let decision = self.process(&input);

        if let Decision::Block { reason } = decision {
            let command = input.bash_command().unwrap_or("");
            self.audit.record_blocked(&input, command, &reason);
            self.voice.notify_blocked();

            let output = HookOutput::deny(&reason, command);
            let json = serde_json::to_string(&output)?;
            info!("Blocked: {}", reason);

            let stdout = io::stdout();
            let mut stdout = stdout.lock();
            writeln!(stdout, "{}", json)?;
        }

        Ok(())
    }

    /// Evaluate hook input and return a decision.
    pub fn process(&self, input: &HookInput) -> Decision {
        debug!(
            "Processing hook: event={}, tool_name={:?}",
            input.event, input.tool_name
        );

        match input.event {
            HookEvent::PreToolUse => self.handle_pre_tool_use(input),
            HookEvent::PostToolUse => Decision::Allow,
            HookEvent::Notification => {
                self.voice.notify(input);
                Decision::Allow
            }
            HookEvent::Stop => self.handle_stop(input),
            HookEvent::SubagentStop => {
                self.voice.notify_subagent_stop();
                Decision::Allow
            }
            HookEvent::PreCompact => {
                self.voice.notify_compact(input.trigger.as_deref().unwrap_or(""));
                Decision::Allow
            }
            HookEvent::Other => {
                debug!("Unknown event type, allowing");
                Decision::Allow
            }
        }
    }

    /// Handle PreToolUse: run Bash commands through the safety filter and
    /// the commit guard. Non-Bash tools are not inspected.
    fn handle_pre_tool_use(&self, input: &HookInput) -> Decision {
        let Some(command) = input.bash_command() else {
            return Decision::Allow;
        };

        let decision = self.filter.evaluate(command);
        if decision.is_blocked() {
            return decision;
        }

        self.commit_guard.evaluate(command)
    }

    /// Handle Stop: create a checkpoint commit if enabled, then announce
    /// session end. The checkpoint outcome drives the spoken phrase so a
    /// session that committed work sounds different from one that did not.
    fn handle_stop(&self, input: &HookInput) -> Decision {
        info!("Stop event received: session_id={:?}", input.session_id);

        let committed = self.checkpoint.run(input);
        self.voice.notify_stop(stop_context_hint(committed.as_deref()));

        Decision::Allow
    }
}

/// Session-end context hint for the spoken phrase.
fn stop_context_hint(checkpoint_commit: Option<&str>) -> &'static str {
    if checkpoint_commit.is_some() {
        "work committed"
    } else {
        "completed work"
    }
}
