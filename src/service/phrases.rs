//! Spoken phrase selection.
//!
//! Each situation has a small pool of phrasings so repeated notifications do
//! not sound robotic. Selection is uniform random.

use rand::seq::SliceRandom;

const PERMISSION_PHRASES: &[(&str, &[&str])] = &[
    (
        "Read",
        &[
            "Permission for Read",
            "Claude wants to read a file",
            "Requesting read access",
        ],
    ),
    (
        "Write",
        &[
            "Permission for Write",
            "Claude wants to write a file",
            "Requesting write access",
        ],
    ),
    (
        "Edit",
        &[
            "Permission for Edit",
            "Claude wants to edit a file",
            "Requesting edit access",
        ],
    ),
    (
        "MultiEdit",
        &[
            "Permission for MultiEdit",
            "Claude wants to edit multiple files",
            "Need permission for batch editing",
        ],
    ),
    (
        "Bash",
        &[
            "Permission for Bash",
            "Claude wants to run a command",
            "Requesting terminal access",
        ],
    ),
    (
        "Grep",
        &[
            "Permission for Grep",
            "Claude wants to search files",
            "Requesting search access",
        ],
    ),
    (
        "Task",
        &[
            "Permission for Task",
            "Claude wants to delegate",
            "Need permission for sub-task",
        ],
    ),
];

const COMPLETION_PHRASES: &[(&str, &[&str])] = &[
    ("Read", &["Read complete", "File loaded", "Reading finished"]),
    ("Write", &["Write complete", "File saved", "Writing finished"]),
    ("Edit", &["Edit complete", "File updated", "Changes saved"]),
    (
        "MultiEdit",
        &["MultiEdit complete", "Multiple files updated", "All changes saved"],
    ),
    (
        "Bash",
        &["Command complete", "Command executed", "Shell operation done"],
    ),
    ("Grep", &["Search complete", "Matches found", "Search finished"]),
    ("Task", &["Task complete", "Sub-task finished", "Delegation done"]),
];

const SESSION_END_WITH_CHANGES: &[&str] = &[
    "Session complete with changes",
    "Work finished, changes saved",
    "Session ended, work committed",
];

const SESSION_END_GENERAL: &[&str] = &[
    "Claude session complete",
    "Work finished successfully",
    "All done, session closed",
];

const SUBAGENT_PHRASES: &[&str] = &[
    "Subagent finished",
    "Sub-task complete",
    "Delegated work done",
];

const ERROR_PHRASES: &[&str] = &[
    "Error occurred",
    "Something went wrong",
    "Claude encountered an issue",
    "Operation failed",
];

const WAITING_PHRASES: &[&str] = &[
    "Claude ready",
    "Ready for input",
    "Claude standing by",
    "Waiting for instructions",
];

const COMPACT_AUTO: &[&str] = &[
    "Automatically compacting conversation",
    "Auto-compacting the chat",
    "Conversation being compressed",
];

const COMPACT_MANUAL: &[&str] = &[
    "Manually compacting conversation",
    "Compacting on request",
    "Manual conversation cleanup",
];

const COMPACT_GENERAL: &[&str] = &[
    "Compacting the conversation",
    "Tidying up the chat",
    "Compressing the session",
];

const BLOCKED_PHRASES: &[&str] = &[
    "Command blocked",
    "Dangerous command stopped",
    "Blocked an unsafe command",
];

const GENERAL_PHRASES: &[&str] = &[
    "Claude notification",
    "Claude update",
    "System message",
];

fn pick(pool: &[&str]) -> String {
    pool.choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("Claude notification")
        .to_string()
}

fn pick_for_tool(table: &[(&str, &[&str])], tool: &str, fallback: String) -> String {
    for (name, pool) in table {
        if *name == tool {
            return pick(pool);
        }
    }
    fallback
}

/// Phrase for a permission request on the named tool.
pub fn permission(tool: &str) -> String {
    pick_for_tool(
        PERMISSION_PHRASES,
        tool,
        format!("Permission for {tool}"),
    )
}

/// Phrase for a completed tool call.
pub fn completion(tool: &str) -> String {
    pick_for_tool(COMPLETION_PHRASES, tool, format!("{tool} complete"))
}

/// Phrase for session end. The context hint decides whether work was saved.
pub fn session_end(context: &str) -> String {
    let context = context.to_lowercase();
    if ["commit", "git", "file"].iter().any(|k| context.contains(k)) {
        pick(SESSION_END_WITH_CHANGES)
    } else {
        pick(SESSION_END_GENERAL)
    }
}

pub fn subagent_end() -> String {
    pick(SUBAGENT_PHRASES)
}

pub fn error() -> String {
    pick(ERROR_PHRASES)
}

pub fn waiting() -> String {
    pick(WAITING_PHRASES)
}

/// Phrase for conversation compaction, keyed on the trigger.
pub fn compact(trigger: &str) -> String {
    match trigger.to_lowercase().as_str() {
        t if t.contains("auto") => pick(COMPACT_AUTO),
        t if t.contains("manual") => pick(COMPACT_MANUAL),
        _ => pick(COMPACT_GENERAL),
    }
}

pub fn blocked() -> String {
    pick(BLOCKED_PHRASES)
}

pub fn general() -> String {
    pick(GENERAL_PHRASES)
}
