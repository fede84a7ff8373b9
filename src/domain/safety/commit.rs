//! Commit-message attribution guard.
//!
//! A narrow check, separate from the command rule table: git commit commands
//! whose message text carries tool self-attribution boilerplate are blocked
//! so it never lands in project history.

use crate::domain::types::Decision;

/// Attribution strings blocked by default.
const DEFAULT_BANNED: &[&str] = &[
    "Generated with [Claude Code](https://claude.ai/code)",
    "Co-Authored-By: Claude <noreply@anthropic.com>",
    "🤖 Generated with [Claude Code]",
    "claude.ai/code",
    "noreply@anthropic.com",
];

/// Guard scanning git-commit commands for banned attribution strings.
pub struct CommitGuard {
    enabled: bool,
    banned: Vec<String>,
}

impl CommitGuard {
    pub fn new(enabled: bool, banned: Vec<String>) -> Self {
        Self { enabled, banned }
    }

    /// The default ban list.
    pub fn default_banned() -> Vec<String> {
        DEFAULT_BANNED.iter().map(|s| s.to_string()).collect()
    }

    /// Check a command. Only commands containing `git commit`
    /// (case-insensitive) are inspected; the attribution strings themselves
    /// are matched verbatim, case-sensitively, against the raw text.
    pub fn evaluate(&self, command: &str) -> Decision {
        if !self.enabled || !command.to_lowercase().contains("git commit") {
            return Decision::Allow;
        }

        for banned in &self.banned {
            if command.contains(banned.as_str()) {
                return Decision::block(format!(
                    "commit message contains blocked attribution: '{banned}'"
                ));
            }
        }

        Decision::Allow
    }
}
