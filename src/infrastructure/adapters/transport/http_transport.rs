//! HTTP Transport - 基于 reqwest 的厂商 API 调用
//!
//! 实现 HttpTransportPort trait。
//! 上传文件以流的形式写入 multipart body，文件句柄随 body 一起释放

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use std::time::Duration;
use tokio_util::io::ReaderStream;

use crate::application::ports::{
    ApiRequest, ApiResponse, HttpMethod, HttpTransportPort, RequestBody, TransportError,
    UploadForm,
};

/// reqwest 传输层
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// 创建新的传输层，超时按请求单独设置
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("voiceclone/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self { client })
    }
}

/// 构造 multipart 表单，文件以流方式上传
fn build_form(upload: UploadForm) -> Result<Form, TransportError> {
    let mut form = Form::new();

    for (name, value) in upload.fields {
        form = form.text(name, value);
    }

    for file in upload.files {
        let stream = ReaderStream::new(file.file);
        let part = Part::stream_with_length(Body::wrap_stream(stream), file.size_bytes)
            .file_name(file.file_name)
            .mime_str(&file.mime_type)
            .map_err(|e| TransportError::InvalidRequest(format!("Invalid MIME type: {}", e)))?;
        form = form.part(file.field, part);
    }

    Ok(form)
}

fn map_send_error(err: reqwest::Error, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(timeout)
    } else if err.is_connect() {
        TransportError::Network(format!("Cannot connect to vendor API: {}", err))
    } else {
        TransportError::Network(err.to_string())
    }
}

#[async_trait]
impl HttpTransportPort for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let timeout = request.timeout;

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        }
        .timeout(timeout);

        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }

        if let RequestBody::Multipart(upload) = request.body {
            builder = builder.multipart(build_form(upload)?);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| map_send_error(e, timeout))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| map_send_error(e, timeout))?;

        tracing::info!(url = %request.url, status, body_len = body.len(), "Vendor API responded");

        Ok(ApiResponse { status, body })
    }
}
