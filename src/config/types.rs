//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::domain::voice::{CloneFlags, TrainMode, Visibility};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// ElevenLabs 配置
    #[serde(default)]
    pub elevenlabs: ElevenLabsConfig,

    /// Fish Audio 配置
    #[serde(default)]
    pub fish_audio: FishAudioConfig,

    /// 上传配置
    #[serde(default)]
    pub upload: UploadConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// ElevenLabs 配置
#[derive(Debug, Clone, Deserialize)]
pub struct ElevenLabsConfig {
    /// API 基础 URL
    #[serde(default = "default_elevenlabs_url")]
    pub base_url: String,

    /// 上传请求超时时间（秒）
    #[serde(default = "default_upload_timeout")]
    pub upload_timeout_secs: u64,

    /// 列表/删除请求超时时间（秒）
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_elevenlabs_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_upload_timeout() -> u64 {
    300
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            base_url: default_elevenlabs_url(),
            upload_timeout_secs: default_upload_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Fish Audio 配置
#[derive(Debug, Clone, Deserialize)]
pub struct FishAudioConfig {
    /// API 基础 URL
    #[serde(default = "default_fish_audio_url")]
    pub base_url: String,

    /// 上传请求超时时间（秒）
    #[serde(default = "default_upload_timeout")]
    pub upload_timeout_secs: u64,

    /// 列表请求超时时间（秒）
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// 模型可见性: public, unlist, private
    #[serde(default)]
    pub visibility: Visibility,

    /// 训练模式: fast, full
    #[serde(default)]
    pub train_mode: TrainMode,
}

fn default_fish_audio_url() -> String {
    "https://api.fish.audio".to_string()
}

impl Default for FishAudioConfig {
    fn default() -> Self {
        Self {
            base_url: default_fish_audio_url(),
            upload_timeout_secs: default_upload_timeout(),
            request_timeout_secs: default_request_timeout(),
            visibility: Visibility::default(),
            train_mode: TrainMode::default(),
        }
    }
}

impl FishAudioConfig {
    pub fn clone_flags(&self) -> CloneFlags {
        CloneFlags {
            visibility: self.visibility,
            train_mode: self.train_mode,
        }
    }
}

/// 上传配置
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// 文件大小软限制（字节），超过只告警，默认 10MB
    #[serde(default = "default_max_size")]
    pub max_size_bytes: u64,

    /// 成功后输出的部署配置变量名
    #[serde(default = "default_output_env_var")]
    pub output_env_var: String,
}

fn default_max_size() -> u64 {
    10 * 1024 * 1024 // 10 MB
}

fn default_output_env_var() -> String {
    "VIJAY_VOICE_ID".to_string()
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: default_max_size(),
            output_env_var: default_output_env_var(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
