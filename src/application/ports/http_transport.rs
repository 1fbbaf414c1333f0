//! HTTP Transport Port - 厂商 API 的传输抽象
//!
//! 具体实现在 infrastructure/adapters/http 层。
//! 上传文件的句柄归 [`UploadForm`] 所有，请求结束（无论成功失败）随 form 一起释放

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// 传输错误
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

/// 待上传的文件分片
#[derive(Debug)]
pub struct UploadFile {
    /// 表单字段名
    pub field: String,
    /// 提交给厂商的文件名
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    /// 已打开的文件句柄
    pub file: tokio::fs::File,
}

/// multipart 表单
#[derive(Debug, Default)]
pub struct UploadForm {
    pub fields: Vec<(String, String)>,
    pub files: Vec<UploadFile>,
}

impl UploadForm {
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn file(mut self, file: UploadFile) -> Self {
        self.files.push(file);
        self
    }
}

#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Multipart(UploadForm),
}

/// 传输层请求
#[derive(Debug)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    pub timeout: Duration,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
            timeout,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn multipart(mut self, form: UploadForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }
}

/// 传输层响应（状态码 + 原始响应体）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 按 JSON 解析响应体，失败返回 None
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.body).ok()
    }
}

/// HTTP Transport Port
///
/// 所有厂商调用都经过这里，测试中可替换为 fake 实现
#[async_trait]
pub trait HttpTransportPort: Send + Sync {
    /// 发送请求。非 2xx 状态码不是错误，只有没拿到响应时才返回 Err
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}
