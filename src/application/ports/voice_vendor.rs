//! Voice Vendor Port - 厂商差异描述
//!
//! 端点、鉴权头、表单字段、成功状态码都由厂商决定，
//! 工作流本身对两家厂商是一致的

use std::time::Duration;

use crate::domain::voice::{
    extract_voice_id, AudioSample, Credential, VoiceCloneRequest, VoiceListing,
};
use crate::domain::Vendor;

pub trait VoiceVendorPort: Send + Sync {
    fn vendor(&self) -> Vendor;

    /// 鉴权头（名称, 值）
    fn auth_header(&self, credential: &Credential) -> (String, String);

    /// 列表端点完整 URL
    fn list_url(&self) -> String;

    /// 创建端点完整 URL
    fn create_url(&self) -> String;

    /// 删除端点完整 URL，不支持删除的厂商返回 None
    fn delete_url(&self, _voice_id: &str) -> Option<String> {
        None
    }

    /// 创建请求的成功状态码
    fn create_success(&self, status: u16) -> bool {
        status == 200
    }

    /// 创建成功后是否把完整响应打印给操作者
    fn echo_create_response(&self) -> bool {
        false
    }

    /// 表单文本字段
    fn form_fields(&self, request: &VoiceCloneRequest) -> Vec<(String, String)>;

    /// 第 `index` 个样本的（字段名, 文件名）
    fn file_part(&self, index: usize, sample: &AudioSample) -> (String, String);

    /// 上传请求超时
    fn upload_timeout(&self) -> Duration;

    /// 列表/删除请求超时
    fn request_timeout(&self) -> Duration;

    fn parse_listing(&self, body: &serde_json::Value) -> Option<VoiceListing> {
        VoiceListing::from_response(body)
    }

    fn parse_voice_id(&self, body: &serde_json::Value) -> Option<String> {
        extract_voice_id(body)
    }
}
