//! Domain Layer - 领域层
//!
//! - Voice Context: 凭证、音频样本、克隆请求/结果、音色清单
//! - Vendor: 支持的克隆厂商

pub mod vendor;
pub mod voice;

pub use vendor::Vendor;
