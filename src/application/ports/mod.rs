//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod http_transport;
mod voice_vendor;

pub use http_transport::{
    ApiRequest, ApiResponse, HttpMethod, HttpTransportPort, RequestBody, TransportError,
    UploadFile, UploadForm,
};
pub use voice_vendor::VoiceVendorPort;
