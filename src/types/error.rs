//! Errors of the outer surfaces (config, scripts, audio assets, sensors)
//!
//! The engine itself never fails; these only surface where files, text or
//! platform services are involved.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("R601_CONFIG_READ: cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("R602_CONFIG_PARSE: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("R603_CONFIG_INVALID: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "R601_CONFIG_READ",
            Self::Parse(_) => "R602_CONFIG_PARSE",
            Self::Invalid(_) => "R603_CONFIG_INVALID",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("R701_UNKNOWN_COMMAND: line {line}: {text}")]
    UnknownCommand { line: usize, text: String },
    #[error("R702_BAD_ARGUMENT: line {line}: {text}")]
    BadArgument { line: usize, text: String },
}

impl ScriptError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand { .. } => "R701_UNKNOWN_COMMAND",
            Self::BadArgument { .. } => "R702_BAD_ARGUMENT",
        }
    }

    pub fn line(&self) -> usize {
        match self {
            Self::UnknownCommand { line, .. } | Self::BadArgument { line, .. } => *line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    #[error("R801_NOT_DATA_URI: source is not a base64 data URI")]
    NotDataUri,
    #[error("R802_BASE64: {0}")]
    Base64(String),
    #[error("R803_NOT_WAV: decoded payload is not a RIFF/WAVE file")]
    NotWav,
}

impl AudioError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotDataUri => "R801_NOT_DATA_URI",
            Self::Base64(_) => "R802_BASE64",
            Self::NotWav => "R803_NOT_WAV",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SensorError {
    #[error("R901_PERMISSION_REQUEST_FAILED: {0}")]
    PermissionRequestFailed(String),
}
