use serde::{Deserialize, Serialize};

use crate::Result;

/// One caption track a remote source offers for a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionTrack {
    /// BCP 47-ish language code (e.g. `"en"`, `"en-US"`). May be empty when the source does not
    /// say.
    pub language_code: String,

    /// Human-readable language name.
    pub language: String,

    /// Whether the track was produced by automatic speech recognition.
    pub is_generated: bool,
}

/// One timed entry of a fetched caption track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionEntry {
    pub text: String,

    #[serde(default)]
    pub start: Option<f64>,

    #[serde(default)]
    pub duration: Option<f64>,
}

impl CaptionEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start: None,
            duration: None,
        }
    }
}

/// Pluggable remote caption source used by [`crate::Fetcher`].
///
/// A source only has to answer two questions: which tracks exist for a video, and what entries a
/// given track contains. Track selection and text joining live in the fetcher, so every source
/// gets the same policy.
pub trait TranscriptSource {
    /// List the caption tracks available for `video_id`.
    fn list_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>>;

    /// Fetch the entries of one track previously returned by [`TranscriptSource::list_tracks`].
    fn fetch_entries(&self, video_id: &str, track: &CaptionTrack) -> Result<Vec<CaptionEntry>>;
}

impl<S: TranscriptSource + ?Sized> TranscriptSource for &S {
    fn list_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>> {
        (**self).list_tracks(video_id)
    }

    fn fetch_entries(&self, video_id: &str, track: &CaptionTrack) -> Result<Vec<CaptionEntry>> {
        (**self).fetch_entries(video_id, track)
    }
}
