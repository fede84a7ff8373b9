//! Service layer containing business logic orchestration.

mod audit;
mod checkpoint;
mod hook_service;
mod phrases;
mod voice;

// Allow unused for potential library API usage
#[allow(unused)]
pub use audit::AuditLog;
#[allow(unused)]
pub use checkpoint::CheckpointService;
#[allow(unused)]
pub use voice::{NotificationContext, VoiceNotifier};

pub use hook_service::HookService;
