use serde::{Serialize, Serializer};

use crate::Result;

/// The tagged result of a transcript extraction.
///
/// Every public "outcome" entry point funnels its errors into this type, so callers (the CLI,
/// the HTTP server, scripts reading our JSON) only ever see one of two shapes:
///
/// ```json
/// {"success":true,"transcript":"hello world"}
/// {"success":false,"error":"VTT file not found: missing.vtt"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { transcript: String },
    Failure { error: String },
}

impl Outcome {
    pub fn success(transcript: impl Into<String>) -> Self {
        Self::Success {
            transcript: transcript.into(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The transcript, if this is a success.
    pub fn transcript(&self) -> Option<&str> {
        match self {
            Self::Success { transcript } => Some(transcript),
            Self::Failure { .. } => None,
        }
    }

    /// The error description, if this is a failure.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    /// Process exit code conventionally paired with this outcome.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }
}

impl From<Result<String>> for Outcome {
    fn from(res: Result<String>) -> Self {
        match res {
            Ok(transcript) => Self::Success { transcript },
            Err(err) => Self::Failure {
                error: err.to_string(),
            },
        }
    }
}

/// Wire shape of [`Outcome`]; exactly one of `transcript` / `error` is present.
#[derive(Serialize)]
struct OutcomeRecord<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    transcript: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        OutcomeRecord {
            success: self.is_success(),
            transcript: self.transcript(),
            error: self.error(),
        }
        .serialize(serializer)
    }
}
