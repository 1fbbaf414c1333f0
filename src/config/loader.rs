//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（voiceclone.toml）
//! 3. 默认值
//!
//! API Key 不在这里加载，由 Credential Resolver 单独读取

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["voiceclone", "voiceclone.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `VOICECLONE_`，层级分隔符 `__`）
/// 2. 配置文件（voiceclone.toml 或 voiceclone.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `VOICECLONE_FISH_AUDIO__UPLOAD_TIMEOUT_SECS=600`
/// - `VOICECLONE_UPLOAD__OUTPUT_ENV_VAR=NARRATOR_VOICE_ID`
/// - `VOICECLONE_LOG__LEVEL=debug`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("elevenlabs.base_url", "https://api.elevenlabs.io")?
        .set_default("elevenlabs.upload_timeout_secs", 300)?
        .set_default("elevenlabs.request_timeout_secs", 30)?
        .set_default("fish_audio.base_url", "https://api.fish.audio")?
        .set_default("fish_audio.upload_timeout_secs", 300)?
        .set_default("fish_audio.request_timeout_secs", 30)?
        .set_default("fish_audio.visibility", "private")?
        .set_default("fish_audio.train_mode", "fast")?
        .set_default("upload.max_size_bytes", 10 * 1024 * 1024)?
        .set_default("upload.output_env_var", "VIJAY_VOICE_ID")?
        .set_default("log.level", "warn")?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: VOICECLONE_FISH_AUDIO__BASE_URL=http://localhost:9000
    builder = builder.add_source(
        Environment::with_prefix("VOICECLONE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.elevenlabs.base_url.is_empty() || config.fish_audio.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Vendor base URL cannot be empty".to_string(),
        ));
    }

    for base_url in [&config.elevenlabs.base_url, &config.fish_audio.base_url] {
        if let Err(e) = reqwest::Url::parse(base_url) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid vendor base URL '{}': {}",
                base_url, e
            )));
        }
    }

    let timeouts = [
        config.elevenlabs.upload_timeout_secs,
        config.elevenlabs.request_timeout_secs,
        config.fish_audio.upload_timeout_secs,
        config.fish_audio.request_timeout_secs,
    ];
    if timeouts.contains(&0) {
        return Err(ConfigError::ValidationError(
            "Request timeouts cannot be 0".to_string(),
        ));
    }

    if config.upload.output_env_var.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Output env var name cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（不包含凭证）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Voice Clone Configuration ===");
    tracing::info!("ElevenLabs URL: {}", config.elevenlabs.base_url);
    tracing::info!("ElevenLabs Upload Timeout: {}s", config.elevenlabs.upload_timeout_secs);
    tracing::info!("Fish Audio URL: {}", config.fish_audio.base_url);
    tracing::info!("Fish Audio Upload Timeout: {}s", config.fish_audio.upload_timeout_secs);
    tracing::info!(
        "Fish Audio Visibility: {}, Train Mode: {}",
        config.fish_audio.visibility.as_str(),
        config.fish_audio.train_mode.as_str()
    );
    tracing::info!("Upload Size Limit: {} bytes", config.upload.max_size_bytes);
    tracing::info!("Output Env Var: {}", config.upload.output_env_var);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
