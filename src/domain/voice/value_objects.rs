//! Voice Context - Value Objects

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::VoiceError;

/// 厂商 API 凭证
///
/// 不变量: 非空。Debug 输出不暴露密钥内容
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Result<Self, VoiceError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(VoiceError::EmptyCredential);
        }
        Ok(Self(secret))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// 音色名称
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceName(String);

impl VoiceName {
    pub fn new(name: impl Into<String>) -> Result<Self, VoiceError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(VoiceError::InvalidName("voice name cannot be empty".to_string()));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 本地音频样本
///
/// 只记录路径和检查结果，文件句柄在上传时才打开
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSample {
    path: PathBuf,
    exists: bool,
    size_bytes: u64,
}

impl AudioSample {
    /// 检查本地文件（是否存在、大小）
    pub async fn inspect(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Self {
                path,
                exists: true,
                size_bytes: meta.len(),
            },
            _ => Self {
                path,
                exists: false,
                size_bytes: 0,
            },
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// 以 MB 为单位的大小
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }

    /// 超过软限制只告警，不阻止上传
    pub fn exceeds(&self, limit_bytes: u64) -> bool {
        self.size_bytes > limit_bytes
    }

    /// 文件扩展名（小写），没有扩展名时返回 None
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| "sample".to_string())
    }

    /// 根据扩展名推断 MIME 类型
    pub fn mime_type(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("webm") => "audio/webm",
            Some("mp3") => "audio/mpeg",
            Some("wav") => "audio/wav",
            Some("m4a") => "audio/mp4",
            Some("ogg") => "audio/ogg",
            Some("flac") => "audio/flac",
            _ => "application/octet-stream",
        }
    }
}

/// 音色可见性（Fish Audio）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Unlist,
    #[default]
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Unlist => "unlist",
            Self::Private => "private",
        }
    }
}

/// 训练模式（Fish Audio）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainMode {
    #[default]
    Fast,
    Full,
}

impl TrainMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Full => "full",
        }
    }
}

/// 厂商特定的克隆选项，不支持的厂商直接忽略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CloneFlags {
    pub visibility: Visibility,
    pub train_mode: TrainMode,
}

/// 克隆请求
#[derive(Debug, Clone)]
pub struct VoiceCloneRequest {
    pub name: VoiceName,
    pub description: Option<String>,
    pub samples: Vec<PathBuf>,
    pub flags: CloneFlags,
}

impl VoiceCloneRequest {
    pub fn new(name: VoiceName, samples: Vec<PathBuf>) -> Self {
        Self {
            name,
            description: None,
            samples,
            flags: CloneFlags::default(),
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.trim().is_empty());
        self
    }

    pub fn with_flags(mut self, flags: CloneFlags) -> Self {
        self.flags = flags;
        self
    }

    /// 描述为空时使用模板 `Voice clone of <name>`
    pub fn effective_description(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| format!("Voice clone of {}", self.name))
    }
}

/// 克隆结果
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceCloneResult {
    Success {
        voice_id: String,
        raw: serde_json::Value,
    },
    /// `status` 为 None 表示请求未得到 HTTP 响应（网络错误、超时）
    Failure {
        status: Option<u16>,
        detail: String,
    },
}

impl VoiceCloneResult {
    pub fn voice_id(&self) -> Option<&str> {
        match self {
            Self::Success { voice_id, .. } => Some(voice_id),
            Self::Failure { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
