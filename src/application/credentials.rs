//! Credential Resolver
//!
//! 在任何网络请求之前读取厂商 API Key。
//! 环境变量查找函数可注入，测试不依赖真实进程环境

use crate::application::error::ConfigurationError;
use crate::domain::voice::Credential;
use crate::domain::Vendor;

/// 用给定的查找函数解析厂商凭证，缺失或为空时返回 MissingCredential
pub fn resolve_credential<F>(vendor: Vendor, lookup: F) -> Result<Credential, ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = vendor.credential_env();
    let secret = lookup(var).ok_or(ConfigurationError::MissingCredential(var))?;
    let credential =
        Credential::new(secret).map_err(|_| ConfigurationError::MissingCredential(var))?;

    tracing::debug!(vendor = %vendor, env = var, "Credential resolved");
    Ok(credential)
}

/// 从进程环境变量读取
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
