//! Voice Queries

/// 列出账户下所有音色
#[derive(Debug, Clone)]
pub struct ListVoices;
