use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;

/// Captext's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Captext's crate-wide error type.
///
/// This is intentionally decoupled from `anyhow` so downstream libraries aren't forced to
/// adopt `anyhow` in their own public APIs.
#[derive(Debug, Error)]
pub enum Error {
    /// The caption file does not exist.
    #[error("VTT file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Any other failure while reading caption input (permissions, invalid UTF-8, ...).
    #[error("Error reading VTT file: {0}")]
    Read(#[source] std::io::Error),

    /// The input could not be resolved to a video identifier.
    #[error("invalid video URL or id: '{0}'")]
    InvalidVideo(String),

    /// The remote source offered no caption tracks for the video.
    #[error("no caption tracks available for video '{video_id}'")]
    NoTracks { video_id: String },

    /// The fetched transcript is shorter than the configured minimum.
    #[error("transcript too short or invalid ({chars} characters, expected at least {min})")]
    TranscriptTooShort { chars: usize, min: usize },

    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Other(#[from] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Classify a read failure for `path`, keeping "missing" distinct from everything else.
    pub(crate) fn from_read(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path: path.into() }
        } else {
            Self::Read(err)
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Message(format!("{err:#}"))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Other(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_maps_to_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::from_read(io, "captions/missing.vtt");
        assert!(matches!(err, Error::NotFound { .. }));
        assert_eq!(err.to_string(), "VTT file not found: captions/missing.vtt");
    }

    #[test]
    fn other_read_failures_keep_underlying_message() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err = Error::from_read(io, "locked.vtt");
        assert!(matches!(err, Error::Read(_)));
        assert_eq!(err.to_string(), "Error reading VTT file: permission denied");
    }

    #[test]
    fn anyhow_errors_keep_context_chain() {
        let err: Error = anyhow::anyhow!("inner").context("outer").into();
        assert_eq!(err.to_string(), "outer: inner");
    }
}
