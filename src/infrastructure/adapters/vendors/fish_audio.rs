//! Fish Audio 厂商适配
//!
//! API:
//! - GET  /model  → `[...]` 或 `{"items": [...]}`，条目含 title/name、_id/id
//! - POST /model  multipart: title, description, visibility, type, train_mode, voices
//!
//! 鉴权头: `Authorization: Bearer <key>`。创建成功返回 200 或 201

use std::time::Duration;

use crate::application::ports::VoiceVendorPort;
use crate::config::FishAudioConfig;
use crate::domain::voice::{AudioSample, Credential, VoiceCloneRequest};
use crate::domain::Vendor;

pub struct FishAudioVendor {
    base_url: String,
    upload_timeout: Duration,
    request_timeout: Duration,
}

impl FishAudioVendor {
    pub fn new(config: &FishAudioConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            upload_timeout: Duration::from_secs(config.upload_timeout_secs),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    fn model_url(&self) -> String {
        format!("{}/model", self.base_url)
    }
}

impl VoiceVendorPort for FishAudioVendor {
    fn vendor(&self) -> Vendor {
        Vendor::FishAudio
    }

    fn auth_header(&self, credential: &Credential) -> (String, String) {
        (
            "Authorization".to_string(),
            format!("Bearer {}", credential.expose()),
        )
    }

    fn list_url(&self) -> String {
        self.model_url()
    }

    fn create_url(&self) -> String {
        self.model_url()
    }

    fn create_success(&self, status: u16) -> bool {
        matches!(status, 200 | 201)
    }

    fn echo_create_response(&self) -> bool {
        true
    }

    fn form_fields(&self, request: &VoiceCloneRequest) -> Vec<(String, String)> {
        vec![
            ("title".to_string(), request.name.to_string()),
            ("description".to_string(), request.effective_description()),
            ("visibility".to_string(), request.flags.visibility.as_str().to_string()),
            ("type".to_string(), "tts".to_string()),
            ("train_mode".to_string(), request.flags.train_mode.as_str().to_string()),
        ]
    }

    fn file_part(&self, _index: usize, sample: &AudioSample) -> (String, String) {
        ("voices".to_string(), sample.file_name())
    }

    fn upload_timeout(&self) -> Duration {
        self.upload_timeout
    }

    fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}
