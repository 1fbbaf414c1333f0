//! Transport Adapter - 厂商 API 传输层实现

mod fake_transport;
mod http_transport;

pub use fake_transport::{FakeTransport, RecordedCall, RecordedFile};
pub use http_transport::ReqwestTransport;
