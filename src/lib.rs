//! `captext` — plain-text transcripts from timed captions.
//!
//! This crate provides:
//! - WebVTT normalization: structural line filtering, markup stripping and rolling-caption
//!   deduplication, producing one readable transcript string
//! - A pluggable remote transcript fetcher with a shared track selection policy
//! - A tagged `Outcome` record (`{success, transcript}` / `{success: false, error}`) for
//!   CLIs, services and scripts
//!
//! The normalizer is pure and synchronous: each call owns its scan state, so calls on
//! different documents can run in parallel without coordination.

// VTT normalization (most consumers should start here).
pub mod cue_line;
pub mod normalizer;
pub mod rolling;

// Result record and crate errors.
pub mod error;
pub mod outcome;

// Remote transcript fetching.
pub mod fetcher;
pub mod opts;
pub mod source;
pub mod sources;
pub mod tracks;
pub mod video_id;

// Output rendering for binaries.
pub mod output_type;

// Logging configuration.
#[cfg(feature = "logging")]
pub mod logging;

pub use error::{Error, Result};
pub use fetcher::Fetcher;
pub use normalizer::{
    clean_vtt_file, normalize_bytes, normalize_file, normalize_reader, normalize_str,
};
pub use opts::FetchOpts;
pub use outcome::Outcome;
pub use output_type::OutputType;
pub use source::{CaptionEntry, CaptionTrack, TranscriptSource};

#[cfg(feature = "http")]
pub use sources::transcript_api::{ApiConfig, TranscriptApiClient};

#[cfg(feature = "logging")]
pub use logging::init as init_logging;
