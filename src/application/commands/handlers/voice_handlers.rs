//! Voice Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateVoiceClone, DeleteVoice};
use crate::application::error::ConfigurationError;
use crate::application::gateway::VendorGateway;
use crate::application::ports::{HttpMethod, UploadFile, UploadForm, VoiceVendorPort};
use crate::domain::voice::{AudioSample, VoiceCloneRequest, VoiceCloneResult};

// ============================================================================
// CreateVoiceClone
// ============================================================================

/// CreateVoiceClone Handler
///
/// 只上传存在的样本；全部缺失时不发请求直接返回 None。
/// 远端拒绝和传输错误都转换为 `VoiceCloneResult::Failure`，不重试
pub struct CreateVoiceCloneHandler {
    gateway: Arc<VendorGateway>,
}

impl CreateVoiceCloneHandler {
    pub fn new(gateway: Arc<VendorGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, command: CreateVoiceClone) -> Option<VoiceCloneResult> {
        let request = command.request;
        let vendor = self.gateway.vendor();
        let reporter = self.gateway.reporter();

        let mut samples = Vec::with_capacity(request.samples.len());
        for path in &request.samples {
            let sample = AudioSample::inspect(path.clone()).await;
            if sample.exists() {
                samples.push(sample);
            } else {
                tracing::warn!(path = %path.display(), "Skipping missing audio sample");
            }
        }

        if samples.is_empty() {
            reporter.line("No valid audio files found!");
            return None;
        }

        reporter.line(format!(
            "Creating voice clone '{}' with {} audio file(s)...",
            request.name,
            samples.len()
        ));
        reporter.line(format!("Uploading to {}...", vendor.vendor()));

        let form = match open_form(vendor, &request, &samples).await {
            Ok(form) => form,
            Err(err) => {
                reporter.line(format!("Exception: {}", err));
                return Some(VoiceCloneResult::Failure {
                    status: None,
                    detail: err.to_string(),
                });
            }
        };

        let api_request = self
            .gateway
            .request(HttpMethod::Post, vendor.create_url(), true)
            .multipart(form);

        // form（连同文件句柄）在 send 返回时已释放
        let response = match self.gateway.send_guarded(api_request).await {
            Ok(response) => response,
            Err(err) => {
                return Some(VoiceCloneResult::Failure {
                    status: None,
                    detail: err.to_string(),
                })
            }
        };

        reporter.line(format!("Response status: {}", response.status));

        if !vendor.create_success(response.status) {
            reporter.line(format!("Error: {}", response.status));
            reporter.line(format!("Response: {}", response.body));
            tracing::warn!(
                vendor = %vendor.vendor(),
                status = response.status,
                "Voice clone rejected"
            );
            return Some(VoiceCloneResult::Failure {
                status: Some(response.status),
                detail: response.body,
            });
        }

        let Some(raw) = response.json() else {
            reporter.line(format!("Error: unreadable response ({})", response.status));
            reporter.line(format!("Response: {}", response.body));
            return Some(VoiceCloneResult::Failure {
                status: Some(response.status),
                detail: response.body,
            });
        };

        match vendor.parse_voice_id(&raw) {
            Some(voice_id) => {
                reporter.line(format!("Success! Voice ID: {}", voice_id));
                if vendor.echo_create_response() {
                    reporter.line(format!("Full response: {}", raw));
                }
                tracing::info!(
                    vendor = %vendor.vendor(),
                    voice_id = %voice_id,
                    name = %request.name,
                    "Voice clone created"
                );
                tracing::debug!(response = %raw, "Full response");
                Some(VoiceCloneResult::Success { voice_id, raw })
            }
            None => {
                reporter.line("Error: response did not contain a voice id");
                reporter.line(format!("Response: {}", response.body));
                Some(VoiceCloneResult::Failure {
                    status: Some(response.status),
                    detail: response.body,
                })
            }
        }
    }
}

/// 打开样本文件并组装表单。任一文件打开失败时已打开的句柄随 form 一起释放
async fn open_form(
    vendor: &dyn VoiceVendorPort,
    request: &VoiceCloneRequest,
    samples: &[AudioSample],
) -> Result<UploadForm, std::io::Error> {
    let mut form = UploadForm::default();

    for (name, value) in vendor.form_fields(request) {
        form = form.text(name, value);
    }

    for (index, sample) in samples.iter().enumerate() {
        let (field, file_name) = vendor.file_part(index, sample);
        let file = tokio::fs::File::open(sample.path()).await?;
        form = form.file(UploadFile {
            field,
            file_name,
            mime_type: sample.mime_type().to_string(),
            size_bytes: sample.size_bytes(),
            file,
        });
    }

    Ok(form)
}

// ============================================================================
// DeleteVoice
// ============================================================================

/// DeleteVoice Handler
///
/// 仅 ElevenLabs 支持。返回是否删除成功（状态码 200）
pub struct DeleteVoiceHandler {
    gateway: Arc<VendorGateway>,
}

impl DeleteVoiceHandler {
    pub fn new(gateway: Arc<VendorGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, command: DeleteVoice) -> Result<bool, ConfigurationError> {
        let vendor = self.gateway.vendor();
        let reporter = self.gateway.reporter();

        if command.voice_id.trim().is_empty() {
            return Err(ConfigurationError::InvalidInput(
                "voice id cannot be empty".to_string(),
            ));
        }

        let url = vendor
            .delete_url(&command.voice_id)
            .ok_or(ConfigurationError::UnsupportedOperation {
                vendor: vendor.vendor(),
                operation: "Deleting voices",
            })?;

        let request = self.gateway.request(HttpMethod::Delete, url, false);
        let Ok(response) = self.gateway.send_guarded(request).await else {
            return Ok(false);
        };

        if response.status == 200 {
            reporter.line(format!("Deleted voice {}", command.voice_id));
            tracing::info!(vendor = %vendor.vendor(), voice_id = %command.voice_id, "Voice deleted");
            Ok(true)
        } else {
            reporter.line(format!("Error: {}", response.status));
            reporter.line(format!("Response: {}", response.body));
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{HttpTransportPort, TransportError};
    use crate::application::report::{CapturedOutput, Reporter};
    use crate::config::{ElevenLabsConfig, FishAudioConfig};
    use crate::domain::voice::{Credential, VoiceName};
    use crate::infrastructure::adapters::{ElevenLabsVendor, FakeTransport, FishAudioVendor};
    use std::io::Write;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;

    fn test_gateway(
        transport: Arc<FakeTransport>,
        vendor: Arc<dyn VoiceVendorPort>,
    ) -> (Arc<VendorGateway>, CapturedOutput) {
        let (reporter, output) = Reporter::capture();
        let transport: Arc<dyn HttpTransportPort> = transport;
        let gateway = VendorGateway::new(
            transport,
            vendor,
            Credential::new("test-key").unwrap(),
            reporter,
        );
        (Arc::new(gateway), output)
    }

    fn elevenlabs() -> Arc<dyn VoiceVendorPort> {
        Arc::new(ElevenLabsVendor::new(&ElevenLabsConfig::default()))
    }

    fn fish_audio() -> Arc<dyn VoiceVendorPort> {
        Arc::new(FishAudioVendor::new(&FishAudioConfig::default()))
    }

    fn write_sample(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        path
    }

    fn command(samples: Vec<PathBuf>) -> CreateVoiceClone {
        CreateVoiceClone {
            request: VoiceCloneRequest::new(VoiceName::new("Vijay TVK").unwrap(), samples),
        }
    }

    #[tokio::test]
    async fn test_missing_files_skip_transport() {
        let transport = Arc::new(FakeTransport::new().respond(200, r#"{"voice_id":"x"}"#));
        let (gateway, output) = test_gateway(transport.clone(), elevenlabs());
        let handler = CreateVoiceCloneHandler::new(gateway);

        let result = handler
            .handle(command(vec![
                PathBuf::from("/missing/one.webm"),
                PathBuf::from("/missing/two.webm"),
            ]))
            .await;

        assert!(result.is_none());
        assert_eq!(transport.call_count(), 0);
        assert!(output.contents().contains("No valid audio files found!"));
    }

    #[tokio::test]
    async fn test_only_existing_files_are_uploaded() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_sample(&dir, "first.webm", b"first-audio");
        let third = write_sample(&dir, "third.mp3", b"third-audio");

        let transport = Arc::new(FakeTransport::new().respond(200, r#"{"voice_id":"abc123"}"#));
        let (gateway, output) = test_gateway(transport.clone(), elevenlabs());
        let handler = CreateVoiceCloneHandler::new(gateway);

        let result = handler
            .handle(command(vec![first, dir.path().join("second.webm"), third]))
            .await
            .unwrap();

        assert_eq!(result.voice_id(), Some("abc123"));
        assert!(!output.contents().contains("Full response"));

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        let files = &calls[0].files;
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].field, "files");
        assert_eq!(files[0].file_name, "sample_0.webm");
        assert_eq!(files[0].mime_type, "audio/webm");
        assert_eq!(files[0].contents, b"first-audio");
        assert_eq!(files[1].file_name, "sample_1.mp3");
        assert_eq!(files[1].mime_type, "audio/mpeg");
        assert_eq!(files[1].contents, b"third-audio");
        assert_eq!(calls[0].header("xi-api-key"), Some("test-key"));
        assert_eq!(calls[0].field("description"), Some("Voice clone of Vijay TVK"));
    }

    #[tokio::test]
    async fn test_transport_error_becomes_failure() {
        let dir = tempfile::tempdir().unwrap();
        let sample = write_sample(&dir, "vijay.webm", b"audio");

        let transport = Arc::new(
            FakeTransport::new().fail(TransportError::Timeout(Duration::from_secs(300))),
        );
        let (gateway, output) = test_gateway(transport.clone(), fish_audio());
        let handler = CreateVoiceCloneHandler::new(gateway);

        let result = handler.handle(command(vec![sample])).await.unwrap();

        assert!(matches!(result, VoiceCloneResult::Failure { status: None, .. }));
        assert!(output.contents().contains("Exception: Request timed out"));
        assert_eq!(transport.calls()[0].files[0].contents, b"audio");
    }

    /// 当前进程中指向 `dir` 下文件的描述符数量
    #[cfg(target_os = "linux")]
    fn open_handles_under(dir: &std::path::Path) -> usize {
        let dir = dir.canonicalize().unwrap();
        std::fs::read_dir("/proc/self/fd")
            .unwrap()
            .filter_map(|entry| std::fs::read_link(entry.ok()?.path()).ok())
            .filter(|target| target.starts_with(&dir))
            .count()
    }

    #[cfg(target_os = "linux")]
    async fn wait_for_handles_released(dir: &std::path::Path) -> usize {
        for _ in 0..20 {
            if open_handles_under(dir) == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        open_handles_under(dir)
    }

    #[cfg(target_os = "linux")]
    fn reqwest_gateway(base_url: String) -> (Arc<VendorGateway>, CapturedOutput) {
        use crate::infrastructure::adapters::ReqwestTransport;

        let (reporter, output) = Reporter::capture();
        let vendor = FishAudioVendor::new(&FishAudioConfig {
            base_url,
            upload_timeout_secs: 1,
            ..Default::default()
        });
        let gateway = VendorGateway::new(
            Arc::new(ReqwestTransport::new().unwrap()),
            Arc::new(vendor),
            Credential::new("test-key").unwrap(),
            reporter,
        );
        (Arc::new(gateway), output)
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_sample_handles_released_after_upload_timeout() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/model"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_string(r#"{"_id":"late"}"#)
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut samples: Vec<PathBuf> = (0..5)
            .map(|i| write_sample(&dir, &format!("part_{}.webm", i), &[i as u8; 4096]))
            .collect();
        samples.insert(2, dir.path().join("missing.webm"));

        let (gateway, output) = reqwest_gateway(mock_server.uri());
        let result = CreateVoiceCloneHandler::new(gateway)
            .handle(command(samples))
            .await
            .unwrap();

        assert!(matches!(result, VoiceCloneResult::Failure { status: None, .. }));
        assert!(output.contents().contains("Exception: Request timed out"));
        assert_eq!(wait_for_handles_released(dir.path()).await, 0);
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_sample_handles_released_after_upload_success() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/model"))
            .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"_id":"fish-7"}"#))
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let samples = vec![
            write_sample(&dir, "a.webm", b"first"),
            dir.path().join("b.webm"),
            write_sample(&dir, "c.webm", b"third"),
        ];

        let (gateway, _output) = reqwest_gateway(mock_server.uri());
        let result = CreateVoiceCloneHandler::new(gateway)
            .handle(command(samples))
            .await
            .unwrap();

        assert_eq!(result.voice_id(), Some("fish-7"));
        assert_eq!(wait_for_handles_released(dir.path()).await, 0);
    }

    #[tokio::test]
    async fn test_rejection_reports_status_and_body() {
        let dir = tempfile::tempdir().unwrap();
        let sample = write_sample(&dir, "vijay.webm", b"audio");

        let transport =
            Arc::new(FakeTransport::new().respond(422, r#"{"detail": "invalid format"}"#));
        let (gateway, output) = test_gateway(transport, elevenlabs());
        let handler = CreateVoiceCloneHandler::new(gateway);

        let result = handler.handle(command(vec![sample])).await.unwrap();

        assert_eq!(result.voice_id(), None);
        assert_eq!(
            result,
            VoiceCloneResult::Failure {
                status: Some(422),
                detail: r#"{"detail": "invalid format"}"#.to_string(),
            }
        );
        let text = output.contents();
        assert!(text.contains("Error: 422"));
        assert!(text.contains(r#"{"detail": "invalid format"}"#));
    }

    #[tokio::test]
    async fn test_fish_audio_accepts_201_with_underscore_id() {
        let dir = tempfile::tempdir().unwrap();
        let sample = write_sample(&dir, "vijay_short_speech.webm", b"audio");

        let transport = Arc::new(FakeTransport::new().respond(201, r#"{"_id":"fish-42"}"#));
        let (gateway, output) = test_gateway(transport.clone(), fish_audio());
        let handler = CreateVoiceCloneHandler::new(gateway);

        let result = handler.handle(command(vec![sample])).await.unwrap();

        assert_eq!(result.voice_id(), Some("fish-42"));
        let text = output.contents();
        assert!(text.contains("Success! Voice ID: fish-42"));
        assert!(text.contains(r#"Full response: {"_id":"fish-42"}"#));

        let call = &transport.calls()[0];
        assert_eq!(call.header("Authorization"), Some("Bearer test-key"));
        assert_eq!(call.field("title"), Some("Vijay TVK"));
        assert_eq!(call.field("visibility"), Some("private"));
        assert_eq!(call.field("train_mode"), Some("fast"));
        assert_eq!(call.files[0].field, "voices");
        assert_eq!(call.files[0].file_name, "vijay_short_speech.webm");
    }

    #[tokio::test]
    async fn test_elevenlabs_rejects_201() {
        let dir = tempfile::tempdir().unwrap();
        let sample = write_sample(&dir, "vijay.webm", b"audio");

        let transport = Arc::new(FakeTransport::new().respond(201, r#"{"voice_id":"x"}"#));
        let (gateway, _output) = test_gateway(transport, elevenlabs());
        let handler = CreateVoiceCloneHandler::new(gateway);

        let result = handler.handle(command(vec![sample])).await.unwrap();
        assert!(!result.is_success());
    }

    #[tokio::test]
    async fn test_success_without_id_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        let sample = write_sample(&dir, "vijay.webm", b"audio");

        let transport = Arc::new(FakeTransport::new().respond(200, r#"{"state":"queued"}"#));
        let (gateway, _output) = test_gateway(transport, fish_audio());
        let handler = CreateVoiceCloneHandler::new(gateway);

        let result = handler.handle(command(vec![sample])).await.unwrap();
        assert!(matches!(result, VoiceCloneResult::Failure { status: Some(200), .. }));
    }

    #[tokio::test]
    async fn test_delete_voice() {
        let transport = Arc::new(FakeTransport::new().respond(200, "{}").respond(400, "bad id"));
        let (gateway, output) = test_gateway(transport.clone(), elevenlabs());
        let handler = DeleteVoiceHandler::new(gateway);

        let deleted = handler
            .handle(DeleteVoice { voice_id: "abc123".to_string() })
            .await
            .unwrap();
        assert!(deleted);

        let deleted = handler
            .handle(DeleteVoice { voice_id: "nope".to_string() })
            .await
            .unwrap();
        assert!(!deleted);

        let calls = transport.calls();
        assert_eq!(calls[0].method, HttpMethod::Delete);
        assert!(calls[0].url.ends_with("/v1/voices/abc123"));
        assert!(output.contents().contains("Response: bad id"));
    }

    #[tokio::test]
    async fn test_delete_rejects_blank_voice_id() {
        let transport = Arc::new(FakeTransport::new());
        let (gateway, _output) = test_gateway(transport.clone(), elevenlabs());

        let result = DeleteVoiceHandler::new(gateway)
            .handle(DeleteVoice { voice_id: " ".to_string() })
            .await;

        assert!(matches!(result, Err(ConfigurationError::InvalidInput(_))));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_unsupported_for_fish_audio() {
        let transport = Arc::new(FakeTransport::new());
        let (gateway, _output) = test_gateway(transport.clone(), fish_audio());
        let handler = DeleteVoiceHandler::new(gateway);

        let result = handler
            .handle(DeleteVoice { voice_id: "abc".to_string() })
            .await;
        assert!(matches!(
            result,
            Err(ConfigurationError::UnsupportedOperation { .. })
        ));
        assert_eq!(transport.call_count(), 0);
    }
}
