//! 应用层错误定义
//!
//! 只有配置类错误会中断工作流（进程退出码 1），
//! 远端拒绝、网络错误都在调用点转换为打印的诊断信息和结果值

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::voice::VoiceError;
use crate::domain::Vendor;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// 凭证环境变量未设置
    #[error("{0} environment variable not set")]
    MissingCredential(&'static str),

    /// 输入音频文件不存在
    #[error("Audio file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// 参数无效
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 厂商不支持该操作
    #[error("{operation} is not supported by {vendor}")]
    UnsupportedOperation {
        vendor: Vendor,
        operation: &'static str,
    },
}

impl From<VoiceError> for ConfigurationError {
    fn from(err: VoiceError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
