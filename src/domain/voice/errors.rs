//! Voice Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoiceError {
    #[error("Credential cannot be empty")]
    EmptyCredential,

    #[error("Invalid voice name: {0}")]
    InvalidName(String),
}
