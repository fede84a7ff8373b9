//! Automatic git checkpoints on session end.
//!
//! When the agent stops with uncommitted changes in the working tree, a
//! checkpoint commit is created. The commit message is generated by asking a
//! local LLM CLI to summarize the change set in conventional-commit form,
//! with a deterministic fallback when that fails. Every failure here is
//! warn-and-continue; a checkpoint must never fail the hook.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, warn};

use crate::config::CheckpointConfig;
use crate::domain::HookInput;

/// One entry of `git status --porcelain`.
#[derive(Debug, Clone)]
pub struct ChangedFile {
    /// File name without directories
    pub name: String,
    /// Path as reported by git
    pub path: String,
    /// Readable status ("modified", "untracked", ...)
    pub status: &'static str,
}

/// Creates checkpoint commits when the agent stops.
pub struct CheckpointService {
    config: CheckpointConfig,
}

impl CheckpointService {
    pub fn new(config: CheckpointConfig) -> Self {
        Self { config }
    }

    /// Run the checkpoint for a Stop event. Returns the commit message when
    /// a checkpoint commit was created, `None` when nothing was committed.
    pub fn run(&self, input: &HookInput) -> Option<String> {
        if !self.config.enabled {
            return None;
        }

        // A stop hook re-triggered by its own activity must not commit again.
        if input.stop_hook_active == Some(true) {
            debug!("Stop hook already active, skipping checkpoint");
            return None;
        }

        let cwd = input
            .cwd
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        if !is_git_repository(&cwd) {
            debug!("Not a git repository: {}", cwd.display());
            return None;
        }

        let files = match changed_files(&cwd) {
            Ok(files) => files,
            Err(e) => {
                warn!("git status failed: {}", e);
                return None;
            }
        };

        if files.is_empty() {
            debug!("No changes detected, skipping checkpoint");
            return None;
        }

        let message = self.generate_message(&files);
        if self.commit(&cwd, &message) {
            Some(message)
        } else {
            None
        }
    }

    /// Produce a commit message for the change set, falling back to a
    /// deterministic summary when the LLM call fails.
    fn generate_message(&self, files: &[ChangedFile]) -> String {
        match self.ask_llm(files) {
            Some(message) => message,
            None => fallback_message(files),
        }
    }

    /// Ask the configured CLI for a one-line conventional commit message.
    fn ask_llm(&self, files: &[ChangedFile]) -> Option<String> {
        let prompt = build_prompt(files);

        let output = Command::new(&self.config.executable)
            .arg("--print")
            .arg("--model")
            .arg(&self.config.model)
            .arg("--output-format")
            .arg("text")
            .arg(&prompt)
            .output();

        let output = match output {
            Ok(o) => o,
            Err(e) => {
                warn!(
                    "Failed to run '{}' for commit message: {}",
                    self.config.executable, e
                );
                return None;
            }
        };

        if !output.status.success() {
            warn!(
                "Commit message generation failed: {}",
                String::from_utf8_lossy(&output.stderr)
            );
            return None;
        }

        let response = String::from_utf8_lossy(&output.stdout);
        clean_response(&response)
    }

    /// Stage everything and commit. Failures are warnings.
    /// Returns true when the commit was created.
    fn commit(&self, cwd: &Path, message: &str) -> bool {
        let add = Command::new("git")
            .args(["add", "-A"])
            .current_dir(cwd)
            .output();

        match add {
            Ok(o) if o.status.success() => {}
            Ok(o) => {
                warn!("git add failed: {}", String::from_utf8_lossy(&o.stderr));
                return false;
            }
            Err(e) => {
                warn!("git add failed: {}", e);
                return false;
            }
        }

        let commit = Command::new("git")
            .args(["commit", "-m", message])
            .current_dir(cwd)
            .output();

        match commit {
            Ok(o) if o.status.success() => {
                info!("Checkpoint commit created: {}", message);
                true
            }
            Ok(o) => {
                warn!("git commit failed: {}", String::from_utf8_lossy(&o.stderr));
                false
            }
            Err(e) => {
                warn!("git commit failed: {}", e);
                false
            }
        }
    }
}

fn is_git_repository(cwd: &Path) -> bool {
    Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .current_dir(cwd)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Run `git status --porcelain` and parse the change list.
fn changed_files(cwd: &Path) -> anyhow::Result<Vec<ChangedFile>> {
    let output = Command::new("git")
        .args(["status", "--porcelain"])
        .current_dir(cwd)
        .output()?;

    if !output.status.success() {
        anyhow::bail!(
            "git status exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(parse_porcelain(&stdout))
}

fn parse_porcelain(stdout: &str) -> Vec<ChangedFile> {
    let mut files = Vec::new();

    for line in stdout.lines() {
        if line.len() < 4 {
            continue;
        }
        let status_code = line[..2].trim();
        let path = line[3..].trim().to_string();
        if path.is_empty() {
            continue;
        }

        let name = path
            .rsplit('/')
            .next()
            .unwrap_or(path.as_str())
            .to_string();

        files.push(ChangedFile {
            name,
            path,
            status: interpret_status(status_code),
        });
    }

    files
}

/// Convert git status codes to readable actions.
fn interpret_status(code: &str) -> &'static str {
    match code {
        "A" => "added",
        "M" | "MM" => "modified",
        "D" => "deleted",
        "R" => "renamed",
        "C" => "copied",
        "??" => "untracked",
        "AM" => "added",
        _ => "changed",
    }
}

fn build_prompt(files: &[ChangedFile]) -> String {
    let mut listing = String::new();
    for file in files.iter().take(10) {
        listing.push_str(&format!("- {} ({})\n", file.path, file.status));
    }
    if files.len() > 10 {
        listing.push_str(&format!("- and {} more\n", files.len() - 10));
    }

    format!(
        "Generate a git commit message using conventional commit format.\n\n\
         Changed files:\n{listing}\n\
         Rules:\n\
         - Format: type(scope): description\n\
         - Under 50 characters\n\
         - Present tense\n\
         - Types: feat, fix, refactor, docs, style, test, chore\n\n\
         Output only the commit message:"
    )
}

const CONVENTIONAL_TYPES: &[&str] = &[
    "feat", "fix", "docs", "style", "refactor", "test", "chore", "build", "ci",
];

/// Extract a single usable commit line from an LLM response.
/// Returns None when no line looks like a commit message.
fn clean_response(response: &str) -> Option<String> {
    for line in response.lines() {
        let line = line.trim().trim_matches(['"', '\'', '`', '*', '-']).trim();

        if line.len() < 8 || line.len() > 72 || !line.contains(':') {
            continue;
        }

        let lowered = line.to_lowercase();
        if CONVENTIONAL_TYPES.iter().any(|t| lowered.starts_with(t)) {
            return Some(line.to_string());
        }
    }

    None
}

/// Deterministic commit message when generation fails.
fn fallback_message(files: &[ChangedFile]) -> String {
    match files {
        [] => "chore: session checkpoint".to_string(),
        [file] => format!("chore: {} {}", file.status, file.name),
        [first, rest @ ..] => format!("chore: update {} +{} more", first.name, rest.len()),
    }
}
