//! Commands - 会修改远端状态的操作（创建、删除音色）

pub mod handlers;
mod voice_commands;

pub use voice_commands::{CreateVoiceClone, DeleteVoice};
