//! Vendor Adapters - 厂商端点与表单描述

mod elevenlabs;
mod fish_audio;

pub use elevenlabs::ElevenLabsVendor;
pub use fish_audio::FishAudioVendor;

use std::sync::Arc;

use crate::application::ports::VoiceVendorPort;
use crate::config::AppConfig;
use crate::domain::Vendor;

/// 根据配置创建厂商适配器
pub fn vendor_from_config(vendor: Vendor, config: &AppConfig) -> Arc<dyn VoiceVendorPort> {
    match vendor {
        Vendor::ElevenLabs => Arc::new(ElevenLabsVendor::new(&config.elevenlabs)),
        Vendor::FishAudio => Arc::new(FishAudioVendor::new(&config.fish_audio)),
    }
}
