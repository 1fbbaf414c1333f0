//! ElevenLabs 厂商适配
//!
//! API:
//! - GET    /v1/voices          → {"voices": [{"name", "voice_id"}]}
//! - POST   /v1/voices/add      multipart: name, description, files(×n) → {"voice_id"}
//! - DELETE /v1/voices/{id}
//!
//! 鉴权头: `xi-api-key: <key>`

use std::time::Duration;

use crate::application::ports::VoiceVendorPort;
use crate::config::ElevenLabsConfig;
use crate::domain::voice::{AudioSample, Credential, VoiceCloneRequest};
use crate::domain::Vendor;

pub struct ElevenLabsVendor {
    base_url: String,
    upload_timeout: Duration,
    request_timeout: Duration,
}

impl ElevenLabsVendor {
    pub fn new(config: &ElevenLabsConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            upload_timeout: Duration::from_secs(config.upload_timeout_secs),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}

impl VoiceVendorPort for ElevenLabsVendor {
    fn vendor(&self) -> Vendor {
        Vendor::ElevenLabs
    }

    fn auth_header(&self, credential: &Credential) -> (String, String) {
        ("xi-api-key".to_string(), credential.expose().to_string())
    }

    fn list_url(&self) -> String {
        format!("{}/v1/voices", self.base_url)
    }

    fn create_url(&self) -> String {
        format!("{}/v1/voices/add", self.base_url)
    }

    /// voice_id 作为单个路径段编码，`?`、`#`、`/` 不会改变目标路径
    fn delete_url(&self, voice_id: &str) -> Option<String> {
        // base_url 已在配置加载时校验
        let mut url = reqwest::Url::parse(&self.list_url()).ok()?;
        url.path_segments_mut().ok()?.push(voice_id);
        Some(url.into())
    }

    fn form_fields(&self, request: &VoiceCloneRequest) -> Vec<(String, String)> {
        vec![
            ("name".to_string(), request.name.to_string()),
            ("description".to_string(), request.effective_description()),
        ]
    }

    fn file_part(&self, index: usize, sample: &AudioSample) -> (String, String) {
        let ext = sample.extension().unwrap_or_else(|| "webm".to_string());
        ("files".to_string(), format!("sample_{}.{}", index, ext))
    }

    fn upload_timeout(&self) -> Duration {
        self.upload_timeout
    }

    fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}
