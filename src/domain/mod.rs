//! Domain layer containing core business logic.
//!
//! This module contains:
//! - Input/output data types for hook processing
//! - The command safety filter and its rule table
//! - The commit-message attribution guard
//! - Logger with rotation

pub mod error;
pub mod logger;
pub mod safety;
mod types;

pub use error::HookError;
pub use safety::{CommitGuard, SafetyFilter};
pub use types::{Decision, HookEvent, HookInput, HookOutput, ToolInput};

#[allow(unused)]
pub use types::{BashInput, FileOperationInput};
