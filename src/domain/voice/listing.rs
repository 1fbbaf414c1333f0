//! Voice Context - 音色清单
//!
//! 两家厂商的列表响应结构不同:
//! - `{"voices": [{"name": .., "voice_id": ..}]}`
//! - `[{"title": .., "_id": ..}]`
//! - `{"items": [{"title": .., "_id": ..}]}`
//!
//! 统一归一化为 [`VoiceListing`]

use serde_json::Value;

const UNKNOWN: &str = "unknown";

/// 清单条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceEntry {
    pub name: String,
    pub voice_id: String,
}

/// 账户下已注册的音色（保持响应顺序）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceListing {
    entries: Vec<VoiceEntry>,
}

impl VoiceListing {
    pub fn new(entries: Vec<VoiceEntry>) -> Self {
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[VoiceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&VoiceEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// 归一化列表响应
    ///
    /// 无法识别的结构返回 None，由调用方打印原始响应
    pub fn from_response(body: &Value) -> Option<Self> {
        let items = match body {
            Value::Array(items) => items,
            Value::Object(map) => match map.get("voices").or_else(|| map.get("items")) {
                Some(Value::Array(items)) => items,
                _ => return None,
            },
            _ => return None,
        };

        let entries = items.iter().map(VoiceEntry::from_item).collect();
        Some(Self { entries })
    }
}

impl VoiceEntry {
    fn from_item(item: &Value) -> Self {
        let name = first_string(item, &["title", "name"]).unwrap_or_else(|| UNKNOWN.to_string());
        let voice_id = extract_voice_id(item).unwrap_or_else(|| UNKNOWN.to_string());
        Self { name, voice_id }
    }
}

/// 从响应中提取音色 ID，依次尝试 `voice_id`、`_id`、`id`
pub fn extract_voice_id(body: &Value) -> Option<String> {
    first_string(body, &["voice_id", "_id", "id"])
}

fn first_string(body: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match body.get(*key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
