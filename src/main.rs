//! voiceclone - 声音克隆命令行
//!
//! ```text
//! voiceclone --vendor fish-audio clone --file vijay.webm --name "Vijay TVK"
//! voiceclone --vendor elevenlabs list
//! voiceclone --vendor elevenlabs delete <voice_id>
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use voiceclone::application::{
    env_lookup, CloneInput, ConfigurationError, Reporter, VoiceCloneWorkflow,
};
use voiceclone::config::{load_config_from_path, print_config};
use voiceclone::domain::voice::CloneFlags;
use voiceclone::domain::Vendor;
use voiceclone::infrastructure::adapters::{vendor_from_config, ReqwestTransport};

/// 支持的厂商
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum VendorArg {
    /// ElevenLabs (xi-api-key)
    #[default]
    Elevenlabs,
    /// Fish Audio (Bearer token)
    FishAudio,
}

impl From<VendorArg> for Vendor {
    fn from(arg: VendorArg) -> Self {
        match arg {
            VendorArg::Elevenlabs => Vendor::ElevenLabs,
            VendorArg::FishAudio => Vendor::FishAudio,
        }
    }
}

/// 上传音频样本到声音克隆服务并输出音色 ID
#[derive(Parser, Debug)]
#[command(name = "voiceclone")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// 克隆服务厂商
    #[arg(long, value_enum, default_value_t = VendorArg::Elevenlabs)]
    vendor: VendorArg,

    /// 配置文件路径（默认搜索 voiceclone.toml）
    #[arg(long, env = "VOICECLONE_CONFIG")]
    config: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 上传样本创建克隆音色
    Clone {
        /// 音频样本，可重复；第一个文件必须存在
        #[arg(short, long = "file", required = true)]
        files: Vec<PathBuf>,

        /// 音色显示名称
        #[arg(short, long)]
        name: String,

        /// 音色描述（默认 "Voice clone of <name>"）
        #[arg(short, long)]
        description: Option<String>,

        /// 成功后输出的部署配置变量名
        #[arg(long)]
        env_var: Option<String>,
    },

    /// 列出账户下已有音色
    List,

    /// 删除音色（仅 ElevenLabs）
    Delete {
        /// 音色 ID
        voice_id: String,
    },
}

fn init_tracing(level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("voiceclone=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("{},voiceclone={}", level, level)))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let reporter = Reporter::stdout();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = match load_config_from_path(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            reporter.line(format!("Error: {}", e));
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level, cli.verbose);
    print_config(&config);

    let vendor: Vendor = cli.vendor.into();
    let transport = Arc::new(ReqwestTransport::new()?);
    let workflow = VoiceCloneWorkflow::new(
        transport,
        vendor_from_config(vendor, &config),
        reporter.clone(),
    );

    let exit_code = match cli.command {
        Command::Clone {
            files,
            name,
            description,
            env_var,
        } => {
            let flags = match vendor {
                Vendor::FishAudio => config.fish_audio.clone_flags(),
                Vendor::ElevenLabs => CloneFlags::default(),
            };
            let input = CloneInput {
                audio_files: files,
                name,
                description,
                flags,
                output_env_var: env_var.unwrap_or_else(|| config.upload.output_env_var.clone()),
                max_size_bytes: config.upload.max_size_bytes,
            };
            workflow
                .run_clone(env_lookup, input)
                .await
                .map(|outcome| outcome.exit_code())
        }
        Command::List => workflow.run_list(env_lookup).await.map(|_| 0),
        Command::Delete { voice_id } => workflow
            .run_delete(env_lookup, voice_id)
            .await
            .map(|deleted| if deleted { 0 } else { 2 }),
    };

    match exit_code {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(err) => {
            report_configuration_error(&reporter, &err);
            std::process::exit(1);
        }
    }
}

fn report_configuration_error(reporter: &Reporter, err: &ConfigurationError) {
    tracing::error!(error = %err, "Voice clone aborted");
    match err {
        ConfigurationError::InputNotFound(_) => reporter.line(err.to_string()),
        _ => reporter.line(format!("Error: {}", err)),
    }
}
