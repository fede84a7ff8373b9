//! Command safety filtering.

mod commit;
mod filter;
mod rules;

pub use commit::CommitGuard;
pub use filter::SafetyFilter;
pub use rules::{builtin_rules, MatchKind, Rule};
