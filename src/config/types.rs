//! Configuration data types.

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::safety::MatchKind;

use super::validation;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Command safety filter settings
    pub safety: SafetyConfig,

    /// Voice notification settings
    pub voice: VoiceConfig,

    /// Git checkpoint settings
    pub checkpoint: CheckpointConfig,

    /// Enable debug logging to file
    pub debug: bool,

    /// Path to log directory (audit JSONL files and debug logs)
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

impl Config {
    /// Validate configuration and return errors if invalid.
    /// Delegates to the comprehensive validation module.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

/// Safety filter configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SafetyConfig {
    /// Enable the built-in dangerous-command rule table
    pub enabled: bool,

    /// Enable the commit-message attribution guard
    pub commit_guard: bool,

    /// Attribution strings blocked in git commit commands.
    /// Empty means use the built-in list.
    pub blocked_attributions: Vec<String>,

    /// User-defined rules, appended after the built-in table
    pub custom_rules: Vec<CustomRule>,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            commit_guard: true,
            blocked_attributions: Vec::new(),
            custom_rules: Vec::new(),
        }
    }
}

/// One user-defined safety rule.
///
/// # Examples
///
/// ```toml
/// [[safety.custom_rules]]
/// pattern = "npm (install|i|add)"
/// kind = "regex"
/// reason = "Use pnpm instead"
///
/// [[safety.custom_rules]]
/// pattern = "terraform destroy"
/// kind = "literal"
/// reason = "Destroys live infrastructure"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CustomRule {
    /// Regex pattern or literal substring, per `kind`
    pub pattern: String,

    /// Matching mode: "regex" or "literal"
    pub kind: MatchKind,

    /// Message surfaced when the rule fires
    pub reason: String,
}

/// Voice notification configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Enable spoken notifications
    pub enabled: bool,

    /// TTS program to spawn
    pub program: String,

    /// Arguments passed to the program; "{text}" is replaced with the phrase.
    /// If no argument contains the placeholder, the phrase is appended.
    pub args: Vec<String>,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            program: default_tts_program().to_string(),
            args: Vec::new(),
        }
    }
}

/// Platform default TTS program.
fn default_tts_program() -> &'static str {
    if cfg!(target_os = "macos") {
        "say"
    } else {
        "espeak"
    }
}

/// Git checkpoint configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CheckpointConfig {
    /// Enable automatic checkpoint commits on Stop
    pub enabled: bool,

    /// CLI used to generate commit messages
    pub executable: String,

    /// Model passed to the CLI
    pub model: String,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            executable: "claude".to_string(),
            model: "claude-3-5-haiku-20241022".to_string(),
        }
    }
}

/// Get default log path (relative to config directory).
/// This returns a placeholder; the actual path is set by ConfigService based
/// on config file location.
pub fn default_log_path() -> PathBuf {
    default_log_path_for_config_dir(None)
}

/// Get log path based on config directory.
pub fn default_log_path_for_config_dir(config_dir: Option<&Path>) -> PathBuf {
    config_dir
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
                .join("sentinel-hooks")
        })
        .join("logs")
}
