//! [`TranscriptSource`] backed by the TranscriptAPI HTTP service.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::Result;
use crate::error::Error;
use crate::source::{CaptionEntry, CaptionTrack, TranscriptSource};

pub const DEFAULT_BASE_URL: &str = "https://transcriptapi.com/api/v2";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_API_KEY: &str = "TRANSCRIPT_API_KEY";
pub const ENV_BASE_URL: &str = "TRANSCRIPT_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "TRANSCRIPT_API_TIMEOUT_SECS";

/// Connection settings for [`TranscriptApiClient`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Build a config from `TRANSCRIPT_API_KEY` (required), `TRANSCRIPT_API_URL` and
    /// `TRANSCRIPT_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(ENV_API_KEY)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::Config(format!("{ENV_API_KEY} not found in environment")))?;

        let mut cfg = Self::new(api_key.trim());

        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            cfg.base_url = url.trim().trim_end_matches('/').to_owned();
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
            cfg.timeout = Duration::from_secs(secs);
        }

        Ok(cfg)
    }
}

/// Blocking client for the TranscriptAPI service.
///
/// The service picks the caption track itself, so this source always reports a single
/// service-default track; [`crate::tracks::select_track`] falls through to it.
pub struct TranscriptApiClient {
    client: Client,
    config: ApiConfig,
}

impl TranscriptApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn transcript_url(&self, video_id: &str) -> String {
        format!(
            "{}/youtube/transcript?video_url={video_id}&format=json",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

impl TranscriptSource for TranscriptApiClient {
    fn list_tracks(&self, _video_id: &str) -> Result<Vec<CaptionTrack>> {
        Ok(vec![CaptionTrack {
            language_code: String::new(),
            language: "service default".to_owned(),
            is_generated: false,
        }])
    }

    fn fetch_entries(&self, video_id: &str, _track: &CaptionTrack) -> Result<Vec<CaptionEntry>> {
        let url = self.transcript_url(video_id);
        debug!(video_id, "requesting transcript");

        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .send()?;

        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            return Err(Error::msg(format!(
                "TranscriptAPI error ({}): {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let value: Value = serde_json::from_str(&body)?;
        parse_response(&value).ok_or_else(|| {
            let preview: String = body.chars().take(200).collect();
            warn!(%preview, "could not parse transcript response");
            Error::msg("invalid response format from TranscriptAPI: no transcript found in response")
        })
    }
}

/// Pull caption entries out of the response shapes the service is known to return:
///
/// 1. an array of segments: `[{"text": "..."}, ...]`
/// 2. an object with a `transcript` array
/// 3. an object with a `text` string
/// 4. an object with a `data` array
pub fn parse_response(value: &Value) -> Option<Vec<CaptionEntry>> {
    if let Some(segments) = value.as_array() {
        return Some(segments.iter().map(entry_from_segment).collect());
    }

    let obj = value.as_object()?;
    if let Some(segments) = obj.get("transcript").and_then(Value::as_array) {
        return Some(segments.iter().map(entry_from_segment).collect());
    }
    if let Some(text) = obj.get("text").and_then(Value::as_str) {
        return Some(vec![CaptionEntry::new(text)]);
    }
    if let Some(segments) = obj.get("data").and_then(Value::as_array) {
        return Some(segments.iter().map(entry_from_segment).collect());
    }

    None
}

fn entry_from_segment(segment: &Value) -> CaptionEntry {
    let text = segment
        .get("text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();
    CaptionEntry {
        text,
        start: segment.get("start").and_then(Value::as_f64),
        duration: segment
            .get("duration")
            .or_else(|| segment.get("dur"))
            .and_then(Value::as_f64),
    }
}
