//! voiceclone - 上传本地音频样本到声音克隆服务（ElevenLabs、Fish Audio）
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: 凭证、音频样本、克隆请求/结果、音色清单
//! - Vendor: 厂商标识
//!
//! 应用层 (application/):
//! - Ports: HttpTransportPort, VoiceVendorPort
//! - Commands: 创建克隆、删除音色
//! - Queries: 列出音色
//! - Workflow: 凭证检查 → 列表 → 校验 → 上传 → 报告
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: reqwest 传输层、fake 传输层、厂商适配

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
