//! Rule table for the command safety filter.
//!
//! A rule pairs a pattern with the reason reported when it fires. Rules are
//! built once at filter construction and never mutated afterwards; evaluation
//! walks the table in order and the first match wins.

use regex::{Regex, RegexBuilder};
use serde::Deserialize;

/// How a rule's pattern is matched against the command text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Regular expression, compiled case-insensitively.
    Regex,
    /// Plain substring containment against the lower-cased command.
    Literal,
}

/// One pattern-to-reason mapping in the filter's rule table.
#[derive(Debug, Clone)]
pub struct Rule {
    matcher: Matcher,
    reason: String,
}

#[derive(Debug, Clone)]
enum Matcher {
    Regex(Regex),
    Literal(String),
}

impl Rule {
    /// Build a regex rule. The pattern is compiled case-insensitively.
    pub fn regex(pattern: &str, reason: impl Into<String>) -> Result<Self, regex::Error> {
        let re = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            matcher: Matcher::Regex(re),
            reason: reason.into(),
        })
    }

    /// Build a literal ban rule with the standard banned-operation reason.
    pub fn literal(token: &str) -> Self {
        Self::literal_with_reason(
            token,
            format!("command contains banned operation: '{}'", token.trim()),
        )
    }

    /// Build a literal ban rule with a custom reason.
    pub fn literal_with_reason(token: &str, reason: impl Into<String>) -> Self {
        Self {
            matcher: Matcher::Literal(token.to_lowercase()),
            reason: reason.into(),
        }
    }

    /// Match against the lower-cased command text.
    pub fn is_match(&self, lowered: &str) -> bool {
        match &self.matcher {
            Matcher::Regex(re) => re.is_match(lowered),
            Matcher::Literal(token) => lowered.contains(token.as_str()),
        }
    }

    pub fn kind(&self) -> MatchKind {
        match self.matcher {
            Matcher::Regex(_) => MatchKind::Regex,
            Matcher::Literal(_) => MatchKind::Literal,
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Targeted regex rules, each with a specific reason. Checked first.
const REGEX_RULES: &[(&str, &str)] = &[
    // Recursive/forced deletion variants
    (r"\brm\s+.*-[a-z]*r[a-z]*f", "rm -rf variations detected"),
    (r"\brm\s+.*-[a-z]*f[a-z]*r", "rm -fr variations detected"),
    (r"\brm\s+--recursive\s+--force", "rm recursive force detected"),
    (r"\brm\s+.*\*.*/", "rm with wildcards on directories"),
    (r"\brm\s+.*\$HOME", "rm targeting home directory"),
    (r"\brm\s+.*~/", "rm targeting user directory"),
    // Permission and privilege escalation
    (r"\bchmod\s+777", "dangerous permissions 777 detected"),
    (r"\bchmod\s+.*777", "dangerous permissions 777 detected"),
    (r"\bsudo\s+rm", "sudo rm command detected"),
    (r"\bsudo\s+chmod\s+777", "sudo chmod 777 detected"),
    // System destruction
    (r"\bdd\s+if=/dev/zero", "disk zeroing command"),
    (r"\bdd\s+if=/dev/random", "disk randomization command"),
    (r">\s*/dev/sd[a-z]", "writing to raw disk device"),
    (r"\bmkfs\.", "filesystem creation on device"),
    (r"\bformat\s+[c-z]:", "Windows format command"),
    // Remote script execution
    (r"\bcurl\s+.*\|\s*(sh|bash)", "curl pipe to shell execution"),
    (r"\bwget\s+.*\|\s*(sh|bash)", "wget pipe to shell execution"),
    (r"\bcurl\s+.*-o.*\.(sh|exe|bat)", "downloading executable files"),
    // Network and system compromise
    (r"\biptables\s+-F", "flushing firewall rules"),
    (r"\bnetsh\s+.*reset", "network configuration reset"),
    (r">\s*/etc/passwd", "writing to passwd file"),
    (r">\s*/etc/shadow", "writing to shadow file"),
    // Process and service disruption
    (r"\bkillall\s+-9", "force killing all processes"),
    (r"\btaskkill\s+/f", "Windows force process kill"),
    (r"\bsc\s+delete", "Windows service deletion"),
    (
        r"\bsystemctl\s+disable.*\.(service|timer)",
        "disabling system services",
    ),
];

/// Broad literal ban list. Substring containment, not word-boundary matching,
/// so partial token hits (e.g. `format_string`) block too; that over-blocking
/// is the documented behavior of this filter.
const LITERAL_BANS: &[&str] = &[
    // Unix/Linux deletion
    "rm ",
    "rm\t",
    "rmdir",
    "unlink",
    // Windows deletion
    "del ",
    "del\t",
    "erase",
    "rd ",
    "rd\t",
    // PowerShell deletion
    "remove-item",
    "remove-",
    "ri ",
    "ri\t",
    // Dangerous utilities
    "shred",
    "wipe",
    "sdelete",
    "format",
    "diskpart",
    "fdisk",
    // System destruction
    "dd if=/dev/zero",
    "dd if=/dev/random",
    "> /dev/sda",
    "mkfs",
    // Package managers (destructive verbs)
    "apt purge",
    "apt-get purge",
    "apt remove",
    "apt-get remove",
    "yum remove",
    "dnf remove",
    "pacman -R",
    "brew uninstall",
    "npm uninstall",
    "pip uninstall",
    // Database destruction
    "drop database",
    "drop table",
    "truncate table",
    "delete from",
    // Git destructive operations
    "git clean -f",
    "git reset --hard",
    "git push --force",
    // Mass deletion helpers
    "find ",
    "xargs",
    // Registry operations
    "reg delete",
    "regedit",
    // Service operations
    "sc delete",
    "net stop",
    "systemctl disable",
    "service stop",
    // Process killing
    "kill -9",
    "killall",
    "taskkill",
    "pkill",
    // Network reset
    "netsh reset",
    "iptables -F",
    "ipconfig /release",
];

/// Build the ordered built-in rule table: regex rules first, then the broad
/// literal ban list.
pub fn builtin_rules() -> Result<Vec<Rule>, regex::Error> {
    let mut rules = Vec::with_capacity(REGEX_RULES.len() + LITERAL_BANS.len());
    for (pattern, reason) in REGEX_RULES {
        rules.push(Rule::regex(pattern, format!("security violation: {reason}"))?);
    }
    for token in LITERAL_BANS {
        rules.push(Rule::literal(token));
    }
    Ok(rules)
}
