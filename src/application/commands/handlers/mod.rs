//! Command Handlers

mod voice_handlers;

pub use voice_handlers::{CreateVoiceCloneHandler, DeleteVoiceHandler};
