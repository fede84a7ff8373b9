//! Configuration validation.

use anyhow::{bail, Result};
use regex::Regex;

use crate::domain::safety::MatchKind;

use super::Config;

/// Validate configuration.
pub fn validate(config: &Config) -> Result<()> {
    // Validate log path
    if !config.log_path.as_os_str().is_empty() {
        // Path will be created if it doesn't exist, so just check it's valid
        if config.log_path.to_string_lossy().contains('\0') {
            bail!("Invalid log_path: contains null character");
        }
    }

    // Validate custom safety rules
    for (i, rule) in config.safety.custom_rules.iter().enumerate() {
        if rule.pattern.is_empty() {
            bail!("safety.custom_rules[{}]: pattern cannot be empty", i);
        }

        if rule.kind == MatchKind::Regex {
            if let Err(e) = Regex::new(&rule.pattern) {
                bail!(
                    "safety.custom_rules[{}]: invalid regex pattern '{}': {}",
                    i,
                    rule.pattern,
                    e
                );
            }
        }

        if rule.reason.is_empty() {
            bail!("safety.custom_rules[{}]: reason cannot be empty", i);
        }
    }

    // Validate blocked attribution strings
    for (i, banned) in config.safety.blocked_attributions.iter().enumerate() {
        if banned.trim().is_empty() {
            bail!("safety.blocked_attributions[{}]: string cannot be empty", i);
        }
    }

    // Validate voice settings
    if config.voice.enabled {
        if config.voice.program.is_empty() {
            bail!("voice.program cannot be empty when voice is enabled");
        }
        for (i, arg) in config.voice.args.iter().enumerate() {
            if arg.is_empty() {
                bail!("voice.args[{}]: argument cannot be empty", i);
            }
        }
    }

    // Validate checkpoint settings
    if config.checkpoint.enabled {
        if config.checkpoint.executable.is_empty() {
            bail!("checkpoint.executable cannot be empty when checkpoint is enabled");
        }
        if config.checkpoint.model.is_empty() {
            bail!("checkpoint.model cannot be empty when checkpoint is enabled");
        }
    }

    Ok(())
}
