//! Fake Transport - 用于测试的传输层
//!
//! 按顺序返回预先排好的响应，并记录收到的每个请求。
//! 上传文件会被完整读出后释放，便于断言实际提交了哪些文件

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::io::AsyncReadExt;

use crate::application::ports::{
    ApiRequest, ApiResponse, HttpMethod, HttpTransportPort, RequestBody, TransportError,
};

/// 记录下来的上传文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFile {
    pub field: String,
    pub file_name: String,
    pub mime_type: String,
    pub contents: Vec<u8>,
}

/// 记录下来的请求
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub fields: Vec<(String, String)>,
    pub files: Vec<RecordedFile>,
}

impl RecordedCall {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Fake Transport
#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个响应
    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.push(Ok(ApiResponse::new(status, body)))
    }

    /// 追加一个传输错误
    pub fn fail(self, err: TransportError) -> Self {
        self.push(Err(err))
    }

    fn push(self, outcome: Result<ApiResponse, TransportError>) -> Self {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(outcome);
        }
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

#[async_trait]
impl HttpTransportPort for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut fields = Vec::new();
        let mut files = Vec::new();

        if let RequestBody::Multipart(form) = request.body {
            fields = form.fields;
            for mut upload in form.files {
                let mut contents = Vec::new();
                upload.file.read_to_end(&mut contents).await?;
                files.push(RecordedFile {
                    field: upload.field,
                    file_name: upload.file_name,
                    mime_type: upload.mime_type,
                    contents,
                });
            }
        }

        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                method: request.method,
                url: request.url,
                headers: request.headers,
                fields,
                files,
            });
        }

        tracing::debug!("FakeTransport: returning queued response");

        self.responses
            .lock()
            .ok()
            .and_then(|mut responses| responses.pop_front())
            .unwrap_or_else(|| Err(TransportError::Network("no response queued".to_string())))
    }
}
