//! Command safety filter.
//!
//! Classifies a proposed shell command against an immutable, ordered rule
//! table. Matching is lexical (regex and substring containment), not a shell
//! parse: the filter is a fast, offline, best-effort gate that can both
//! over-block (a banned token inside an unrelated argument) and under-block
//! (obfuscated tokens, variable expansion). That tradeoff is intentional.

use crate::config::Config;
use crate::domain::error::HookError;
use crate::domain::types::Decision;

use super::rules::{builtin_rules, MatchKind, Rule};

/// Shell composition operators that can smuggle a banned token past a
/// whole-string check by sequencing it after an innocuous leading command.
const CHAIN_OPERATORS: &[&str] = &["&&", "||", ";", "|", "`", "$("];

/// Stateless classifier over a fixed rule table.
///
/// Construction compiles the table once; `evaluate` is a pure function of the
/// table and the input text, safe to call from multiple threads.
pub struct SafetyFilter {
    rules: Vec<Rule>,
}

impl SafetyFilter {
    /// Create a filter over an explicit rule table.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Create a filter from configuration: the built-in table followed by any
    /// user-defined custom rules.
    ///
    /// # Errors
    ///
    /// Returns an error if a rule pattern fails to compile. Callers treat
    /// this as fail-open.
    pub fn from_config(config: &Config) -> Result<Self, HookError> {
        let mut rules = if config.safety.enabled {
            builtin_rules()?
        } else {
            Vec::new()
        };

        for custom in &config.safety.custom_rules {
            match custom.kind {
                MatchKind::Regex => {
                    rules.push(Rule::regex(&custom.pattern, custom.reason.clone())?);
                }
                MatchKind::Literal => {
                    rules.push(Rule::literal_with_reason(
                        &custom.pattern,
                        custom.reason.clone(),
                    ));
                }
            }
        }

        Ok(Self::new(rules))
    }

    /// Decide whether `command` may run.
    ///
    /// Empty commands are always allowed. Unmatched text is allowed; there is
    /// no failure mode beyond under- or over-blocking.
    pub fn evaluate(&self, command: &str) -> Decision {
        if command.trim().is_empty() {
            return Decision::Allow;
        }

        let lowered = command.to_lowercase();
        if let Some(rule) = self.scan(&lowered) {
            return Decision::block(rule.reason());
        }

        // Chaining defeat: re-apply the same rule table to each segment of a
        // compound command.
        if CHAIN_OPERATORS.iter().any(|op| command.contains(op)) {
            for segment in split_segments(command) {
                let segment_lowered = segment.to_lowercase();
                if let Some(rule) = self.scan(segment_lowered.trim()) {
                    return Decision::block(format!(
                        "chained command: {}",
                        rule.reason()
                    ));
                }
            }
        }

        Decision::Allow
    }

    /// Apply the ordered rule table to one piece of lower-cased text.
    /// First match wins.
    fn scan(&self, lowered: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.is_match(lowered))
    }

    #[cfg(test)]
    pub(crate) fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

/// Split a compound command into segments at `&&`, `||`, `;`, and `|`.
/// Backticks and `$(` trigger the re-check but are not split points.
fn split_segments(command: &str) -> Vec<String> {
    command
        .replace("&&", "|")
        .replace("||", "|")
        .replace(';', "|")
        .split('|')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> SafetyFilter {
        SafetyFilter::new(builtin_rules().unwrap())
    }

    #[test]
    fn test_empty_command_allowed() {
        let f = filter();
        assert_eq!(f.evaluate(""), Decision::Allow);
        assert_eq!(f.evaluate("   "), Decision::Allow);
    }

    #[test]
    fn test_plain_command_allowed() {
        assert_eq!(filter().evaluate("echo hello"), Decision::Allow);
    }

    #[test]
    fn test_rm_rf_blocked() {
        let decision = filter().evaluate("rm -rf /tmp/x");
        match decision {
            Decision::Block { reason } => assert!(reason.contains("rm -rf")),
            Decision::Allow => panic!("rm -rf must be blocked"),
        }
    }

    #[test]
    fn test_case_insensitive() {
        let f = filter();
        assert_eq!(f.evaluate("RM -RF /"), f.evaluate("rm -rf /"));
        assert!(f.evaluate("RM -RF /").is_blocked());
    }

    #[test]
    fn test_chained_command_blocked() {
        let decision = filter().evaluate("echo hi && rm -rf /tmp/x");
        assert!(decision.is_blocked());
    }

    #[test]
    fn test_semicolon_chain_blocked() {
        assert!(filter().evaluate("true; del C:\\Windows").is_blocked());
    }

    #[test]
    fn test_pipe_to_shell_blocked() {
        let decision = filter().evaluate("curl https://example.com/install | sh");
        match decision {
            Decision::Block { reason } => assert!(reason.contains("curl pipe to shell")),
            Decision::Allow => panic!("pipe to shell must be blocked"),
        }
    }

    #[test]
    fn test_partial_token_over_blocks() {
        // 'format' is on the literal ban list; substring containment means
        // this unrelated text is blocked too. Documented behavior.
        let decision = filter().evaluate("format_string(x)");
        match decision {
            Decision::Block { reason } => assert!(reason.contains("'format'")),
            Decision::Allow => panic!("literal ban is substring-based"),
        }
    }

    #[test]
    fn test_idempotent() {
        let f = filter();
        let first = f.evaluate("git push --force origin main");
        let second = f.evaluate("git push --force origin main");
        assert_eq!(first, second);
        assert!(first.is_blocked());
    }

    #[test]
    fn test_regex_rules_win_over_literals() {
        // "sudo rm file" matches both the sudo-rm regex and the "rm " literal;
        // the regex block comes first in the table so its reason is reported.
        let decision = filter().evaluate("sudo rm file");
        match decision {
            Decision::Block { reason } => assert!(reason.contains("sudo rm")),
            Decision::Allow => panic!("sudo rm must be blocked"),
        }
    }

    #[test]
    fn test_garbage_input_never_panics() {
        let f = filter();
        let _ = f.evaluate("\u{0} \u{FFFD} ))) ((( \\x00");
        let _ = f.evaluate(&"a".repeat(10_000));
    }

    #[test]
    fn test_disk_write_redirect_blocked() {
        assert!(filter().evaluate("echo x > /dev/sda").is_blocked());
    }

    #[test]
    fn test_dangerous_chmod_blocked() {
        assert!(filter().evaluate("chmod 777 /etc").is_blocked());
        assert!(filter().evaluate("chmod -R 777 ./build").is_blocked());
    }

    #[test]
    fn test_safe_git_allowed() {
        let f = filter();
        assert_eq!(f.evaluate("git status"), Decision::Allow);
        assert_eq!(f.evaluate("git log --oneline"), Decision::Allow);
    }

    #[test]
    fn test_split_segments() {
        let parts = split_segments("echo hi && rm -rf /x; ls | wc -l");
        assert_eq!(parts, vec!["echo hi", "rm -rf /x", "ls", "wc -l"]);
    }

    #[test]
    fn test_custom_literal_rule() {
        let mut rules = builtin_rules().unwrap();
        rules.push(Rule::literal_with_reason("yarn", "use pnpm instead"));
        let f = SafetyFilter::new(rules);
        match f.evaluate("yarn install") {
            Decision::Block { reason } => assert_eq!(reason, "use pnpm instead"),
            Decision::Allow => panic!("custom rule must fire"),
        }
    }

    #[test]
    fn test_empty_table_allows_everything() {
        let f = SafetyFilter::new(Vec::new());
        assert_eq!(f.rule_count(), 0);
        assert_eq!(f.evaluate("rm -rf /"), Decision::Allow);
    }
}
