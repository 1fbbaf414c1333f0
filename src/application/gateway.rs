//! Vendor Gateway - 带凭证的厂商调用入口
//!
//! 列表、创建、删除都经过 [`VendorGateway::send_guarded`]：
//! 传输错误在这里统一记录并打印，调用方只需把 Err 转成自己的结果值

use std::sync::Arc;

use crate::application::ports::{
    ApiRequest, ApiResponse, HttpMethod, HttpTransportPort, TransportError, VoiceVendorPort,
};
use crate::application::report::Reporter;
use crate::domain::voice::Credential;

pub struct VendorGateway {
    transport: Arc<dyn HttpTransportPort>,
    vendor: Arc<dyn VoiceVendorPort>,
    credential: Credential,
    reporter: Reporter,
}

impl VendorGateway {
    pub fn new(
        transport: Arc<dyn HttpTransportPort>,
        vendor: Arc<dyn VoiceVendorPort>,
        credential: Credential,
        reporter: Reporter,
    ) -> Self {
        Self {
            transport,
            vendor,
            credential,
            reporter,
        }
    }

    pub fn vendor(&self) -> &dyn VoiceVendorPort {
        self.vendor.as_ref()
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    /// 构造带鉴权头的请求
    pub fn request(&self, method: HttpMethod, url: String, long_running: bool) -> ApiRequest {
        let timeout = if long_running {
            self.vendor.upload_timeout()
        } else {
            self.vendor.request_timeout()
        };
        let (name, value) = self.vendor.auth_header(&self.credential);
        ApiRequest::new(method, url, timeout).header(name, value)
    }

    /// 发送请求，传输错误打印 `Exception: ..` 后原样返回
    pub async fn send_guarded(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let method = request.method;
        let url = request.url.clone();
        let vendor = self.vendor.vendor();

        tracing::debug!(vendor = %vendor, method = %method, url = %url, "Sending request");

        match self.transport.send(request).await {
            Ok(response) => {
                tracing::debug!(
                    vendor = %vendor,
                    method = %method,
                    url = %url,
                    status = response.status,
                    body_len = response.body.len(),
                    "Response received"
                );
                Ok(response)
            }
            Err(err) => {
                tracing::warn!(
                    vendor = %vendor,
                    method = %method,
                    url = %url,
                    error = %err,
                    "Request failed"
                );
                self.reporter.line(format!("Exception: {}", err));
                Err(err)
            }
        }
    }
}
