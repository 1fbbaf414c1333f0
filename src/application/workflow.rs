//! Voice Clone Workflow - 克隆流程编排
//!
//! 两家厂商共用同一流程:
//!
//! ```text
//! 检查凭证 → 列出已有音色（尽力而为）→ 校验输入文件 → [超限告警] → 上传 → 报告
//! ```
//!
//! 凭证缺失、输入文件缺失返回 ConfigurationError（进程退出码 1），不发起上传

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::commands::handlers::{CreateVoiceCloneHandler, DeleteVoiceHandler};
use crate::application::commands::{CreateVoiceClone, DeleteVoice};
use crate::application::credentials::resolve_credential;
use crate::application::error::ConfigurationError;
use crate::application::gateway::VendorGateway;
use crate::application::ports::{HttpTransportPort, VoiceVendorPort};
use crate::application::queries::handlers::ListVoicesHandler;
use crate::application::queries::ListVoices;
use crate::application::report::Reporter;
use crate::domain::voice::{
    AudioSample, CloneFlags, VoiceCloneRequest, VoiceCloneResult, VoiceListing, VoiceName,
};

/// 克隆流程输入
#[derive(Debug, Clone)]
pub struct CloneInput {
    /// 音频样本，第一个为必须存在的主样本
    pub audio_files: Vec<PathBuf>,
    pub name: String,
    pub description: Option<String>,
    pub flags: CloneFlags,
    /// 成功后输出 `<output_env_var>=<voice_id>`
    pub output_env_var: String,
    /// 文件大小软限制（字节）
    pub max_size_bytes: u64,
}

/// 克隆流程结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    Created { voice_id: String },
    Rejected { status: Option<u16>, detail: String },
    NoValidFiles,
}

impl WorkflowOutcome {
    /// 进程退出码：远端失败用 2，与配置错误（1）区分
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Created { .. } => 0,
            Self::Rejected { .. } | Self::NoValidFiles => 2,
        }
    }
}

pub struct VoiceCloneWorkflow {
    transport: Arc<dyn HttpTransportPort>,
    vendor: Arc<dyn VoiceVendorPort>,
    reporter: Reporter,
}

impl VoiceCloneWorkflow {
    pub fn new(
        transport: Arc<dyn HttpTransportPort>,
        vendor: Arc<dyn VoiceVendorPort>,
        reporter: Reporter,
    ) -> Self {
        Self {
            transport,
            vendor,
            reporter,
        }
    }

    /// 解析凭证并创建 gateway，凭证缺失时不会产生任何网络调用
    fn connect<F>(&self, lookup: F) -> Result<Arc<VendorGateway>, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credential = resolve_credential(self.vendor.vendor(), lookup)?;
        Ok(Arc::new(VendorGateway::new(
            self.transport.clone(),
            self.vendor.clone(),
            credential,
            self.reporter.clone(),
        )))
    }

    /// 完整克隆流程
    pub async fn run_clone<F>(
        &self,
        lookup: F,
        input: CloneInput,
    ) -> Result<WorkflowOutcome, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gateway = self.connect(lookup)?;
        let name = VoiceName::new(input.name)?;
        let vendor = self.vendor.vendor();

        tracing::info!(vendor = %vendor, name = %name, files = input.audio_files.len(), "Starting voice clone workflow");

        self.reporter.line("Checking existing voices...");
        ListVoicesHandler::new(gateway.clone())
            .handle(ListVoices)
            .await;

        let primary = input
            .audio_files
            .first()
            .ok_or_else(|| ConfigurationError::InvalidInput("no audio file given".to_string()))?;
        if !AudioSample::inspect(primary.clone()).await.exists() {
            return Err(ConfigurationError::InputNotFound(primary.clone()));
        }

        for path in &input.audio_files {
            let sample = AudioSample::inspect(path.clone()).await;
            if !sample.exists() {
                continue;
            }
            self.reporter
                .line(format!("\nAudio file size: {:.2} MB", sample.size_mb()));
            if sample.exceeds(input.max_size_bytes) {
                tracing::warn!(
                    path = %path.display(),
                    size_bytes = sample.size_bytes(),
                    limit_bytes = input.max_size_bytes,
                    "Audio sample exceeds size limit"
                );
                self.reporter
                    .line(format!("Warning: File is large. {} may reject it.", vendor));
                self.reporter
                    .line("Consider using ffmpeg to extract a shorter segment.");
            }
        }

        self.reporter.line("");
        self.reporter.separator();

        let request = VoiceCloneRequest::new(name, input.audio_files)
            .with_description(input.description)
            .with_flags(input.flags);

        let result = CreateVoiceCloneHandler::new(gateway)
            .handle(CreateVoiceClone { request })
            .await;

        let outcome = match result {
            Some(VoiceCloneResult::Success { voice_id, .. }) => {
                self.reporter.line("");
                self.reporter.separator();
                self.reporter.line("Voice clone created successfully!");
                self.reporter.line(format!("Voice ID: {}", voice_id));
                self.reporter.line("\nAdd this to your deployment environment:");
                self.reporter
                    .line(format!("{}={}", input.output_env_var, voice_id));
                WorkflowOutcome::Created { voice_id }
            }
            Some(VoiceCloneResult::Failure { status, detail }) => {
                self.reporter.line("\nVoice clone failed; no voice id was produced.");
                WorkflowOutcome::Rejected { status, detail }
            }
            None => WorkflowOutcome::NoValidFiles,
        };

        tracing::info!(vendor = %vendor, outcome = ?outcome, "Voice clone workflow finished");
        Ok(outcome)
    }

    /// 只列出已有音色
    pub async fn run_list<F>(&self, lookup: F) -> Result<VoiceListing, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gateway = self.connect(lookup)?;
        self.reporter.line("Checking existing voices...");
        Ok(ListVoicesHandler::new(gateway).handle(ListVoices).await)
    }

    /// 删除音色（不属于克隆流程）
    pub async fn run_delete<F>(&self, lookup: F, voice_id: String) -> Result<bool, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gateway = self.connect(lookup)?;
        DeleteVoiceHandler::new(gateway)
            .handle(DeleteVoice { voice_id })
            .await
    }
}
