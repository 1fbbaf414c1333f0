//! Voice Commands

use crate::domain::voice::VoiceCloneRequest;

/// 创建克隆音色命令
#[derive(Debug, Clone)]
pub struct CreateVoiceClone {
    pub request: VoiceCloneRequest,
}

/// 删除音色命令
#[derive(Debug, Clone)]
pub struct DeleteVoice {
    pub voice_id: String,
}
