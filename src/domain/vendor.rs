//! 声音克隆厂商

/// 支持的厂商
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    ElevenLabs,
    FishAudio,
}

impl Vendor {
    /// 存放 API Key 的环境变量名
    pub fn credential_env(&self) -> &'static str {
        match self {
            Self::ElevenLabs => "ELEVENLABS_API_KEY",
            Self::FishAudio => "FISH_AUDIO_API_KEY",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ElevenLabs => "ElevenLabs",
            Self::FishAudio => "Fish Audio",
        }
    }
}

impl std::fmt::Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
