//! Configuration service for loading and generating config files.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::types::default_log_path_for_config_dir;
use super::Config;

/// Configuration service.
pub struct ConfigService;

impl ConfigService {
    /// Get the default configuration file path.
    /// Always uses ~/.config/sentinel-hooks/config.toml for cross-platform consistency.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("sentinel-hooks")
            .join("config.toml")
    }

    /// Load configuration from file.
    ///
    /// If `path` is `None`, uses the default path.
    /// If the file doesn't exist, creates default configuration file.
    /// Validates configuration after loading.
    /// Log path defaults to the same directory as config file.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let path = path.map(PathBuf::from).unwrap_or_else(Self::default_path);
        let config_dir = path.parent();

        if !path.exists() {
            // Create default config file
            Self::generate_at(&path)?;
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        // If log_path was not explicitly set in config, use config file directory
        // Check if log_path matches the general default (meaning it wasn't set in file)
        let general_default = default_log_path_for_config_dir(None);
        if config.log_path == general_default {
            config.log_path = default_log_path_for_config_dir(config_dir);
        }

        // Validate configuration
        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        Ok(config)
    }

    /// Generate default configuration file at the default path.
    pub fn generate_default() -> Result<()> {
        Self::generate_at(&Self::default_path())
    }

    /// Generate default configuration file at the specified path.
    pub fn generate_at(path: &Path) -> Result<()> {
        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = Self::default_config_content();
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Generate default configuration content with comments.
    fn default_config_content() -> String {
        r#"# sentinel-hooks configuration file

# Enable debug logging to file (default: false)
debug = false

# Path to log directory (default: same directory as config.toml/logs)
# If --config is specified, logs go to that directory/logs
# log_path = "~/.config/sentinel-hooks/logs"

[safety]
# Enable the built-in dangerous-command rule table (default: true)
enabled = true
# Block git commit commands carrying tool attribution boilerplate (default: true)
commit_guard = true
# Override the built-in attribution ban list
# blocked_attributions = ["Co-Authored-By: Claude <noreply@anthropic.com>"]

# Custom safety rules, checked after the built-in table
# kind = "regex" matches a case-insensitive regex; kind = "literal" matches a substring
# [[safety.custom_rules]]
# pattern = "terraform (destroy|apply)"
# kind = "regex"
# reason = "Terraform changes must go through CI"

# [[safety.custom_rules]]
# pattern = "yarn"
# kind = "literal"
# reason = "Use pnpm instead of yarn"

[voice]
# Speak notifications via a local TTS program (default: false)
enabled = false
# TTS program and arguments; "{text}" is replaced with the spoken phrase
# program = "say"                  # macOS
# args = ["{text}"]
# program = "espeak"               # Linux
# args = ["-s", "150", "{text}"]

[checkpoint]
# Automatically commit a work-in-progress checkpoint when the agent stops (default: false)
enabled = false
# CLI used to generate commit messages from the diff
# executable = "claude"
# model = "claude-3-5-haiku-20241022"
"#
        .to_string()
    }
}
