//! High-level API for fetching remote transcripts.
//!
//! `Fetcher` wraps a [`TranscriptSource`] and applies the same policy to every source:
//! resolve the video id → list tracks → pick one → fetch its entries → join them into one
//! string → enforce the minimum length from [`FetchOpts`].

use tracing::{debug, info};

use crate::Result;
use crate::error::Error;
use crate::opts::FetchOpts;
use crate::outcome::Outcome;
use crate::source::TranscriptSource;
use crate::tracks::{join_entries, select_track};
use crate::video_id::resolve_video_id;

/// The main remote-transcript entry point.
///
/// Typical usage:
/// - Construct once around a source (which may hold an HTTP client).
/// - Call `fetch` / `fetch_outcome` for as many videos as needed.
pub struct Fetcher<S: TranscriptSource> {
    source: S,
}

impl<S: TranscriptSource> Fetcher<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch a transcript for `video`, which may be a URL or a bare video id.
    pub fn fetch(&self, video: &str, opts: &FetchOpts) -> Result<String> {
        let video_id =
            resolve_video_id(video).ok_or_else(|| Error::InvalidVideo(video.trim().to_owned()))?;

        let tracks = self.source.list_tracks(video_id)?;
        let track = select_track(&tracks, &opts.languages).ok_or_else(|| Error::NoTracks {
            video_id: video_id.to_owned(),
        })?;
        debug!(
            video_id,
            language = %track.language_code,
            generated = track.is_generated,
            available = tracks.len(),
            "selected caption track"
        );

        let entries = self.source.fetch_entries(video_id, track)?;
        let transcript = join_entries(&entries);

        let chars = transcript.chars().count();
        if chars < opts.min_transcript_chars {
            return Err(Error::TranscriptTooShort {
                chars,
                min: opts.min_transcript_chars,
            });
        }

        info!(video_id, entries = entries.len(), chars, "transcript fetched");
        Ok(transcript)
    }

    /// Like [`Fetcher::fetch`], folding any failure into an [`Outcome`].
    pub fn fetch_outcome(&self, video: &str, opts: &FetchOpts) -> Outcome {
        self.fetch(video, opts).into()
    }
}
