//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 凭证、音色名称、本地音频样本等值对象
//! - 克隆请求与结果
//! - 音色清单归一化

mod errors;
mod listing;
mod value_objects;

pub use errors::VoiceError;
pub use listing::{extract_voice_id, VoiceEntry, VoiceListing};
pub use value_objects::{
    AudioSample, CloneFlags, Credential, TrainMode, Visibility, VoiceCloneRequest,
    VoiceCloneResult, VoiceName,
};
