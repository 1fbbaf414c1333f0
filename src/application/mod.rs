//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（HttpTransport、VoiceVendor）
//! - commands: 创建/删除音色
//! - queries: 列出音色
//! - workflow: 克隆流程编排
//! - error: 应用层错误定义

pub mod commands;
pub mod credentials;
pub mod error;
pub mod gateway;
pub mod ports;
pub mod queries;
pub mod report;
pub mod workflow;

// Re-exports
pub use commands::{
    handlers::{CreateVoiceCloneHandler, DeleteVoiceHandler},
    CreateVoiceClone, DeleteVoice,
};
pub use credentials::{env_lookup, resolve_credential};
pub use error::ConfigurationError;
pub use gateway::VendorGateway;
pub use ports::{
    ApiRequest, ApiResponse, HttpMethod, HttpTransportPort, RequestBody, TransportError,
    UploadFile, UploadForm, VoiceVendorPort,
};
pub use queries::{handlers::ListVoicesHandler, ListVoices};
pub use report::{CapturedOutput, Reporter};
pub use workflow::{CloneInput, VoiceCloneWorkflow, WorkflowOutcome};
