use std::cell::RefCell;

use captext::{CaptionEntry, CaptionTrack, Error, FetchOpts, Fetcher, Outcome, TranscriptSource};

/// In-memory source that records which track the fetcher asked for.
struct FakeSource {
    tracks: Vec<CaptionTrack>,
    requested: RefCell<Vec<(String, String)>>,
}

impl FakeSource {
    fn new(tracks: Vec<CaptionTrack>) -> Self {
        Self {
            tracks,
            requested: RefCell::new(Vec::new()),
        }
    }
}

impl TranscriptSource for FakeSource {
    fn list_tracks(&self, _video_id: &str) -> captext::Result<Vec<CaptionTrack>> {
        Ok(self.tracks.clone())
    }

    fn fetch_entries(
        &self,
        video_id: &str,
        track: &CaptionTrack,
    ) -> captext::Result<Vec<CaptionEntry>> {
        self.requested
            .borrow_mut()
            .push((video_id.to_owned(), track.language_code.clone()));

        let kind = if track.is_generated { "auto" } else { "manual" };
        Ok(vec![
            CaptionEntry::new(format!("{kind} {}", track.language_code)),
            CaptionEntry::new("  "),
            CaptionEntry::new("transcript text"),
        ])
    }
}

struct FailingSource;

impl TranscriptSource for FailingSource {
    fn list_tracks(&self, video_id: &str) -> captext::Result<Vec<CaptionTrack>> {
        Err(Error::Message(format!("video unavailable: {video_id}")))
    }

    fn fetch_entries(&self, _: &str, _: &CaptionTrack) -> captext::Result<Vec<CaptionEntry>> {
        unreachable!("list_tracks always fails")
    }
}

fn track(code: &str, generated: bool) -> CaptionTrack {
    CaptionTrack {
        language_code: code.to_owned(),
        language: code.to_owned(),
        is_generated: generated,
    }
}

#[test]
fn fetches_preferred_manual_track_from_url() -> anyhow::Result<()> {
    let source = FakeSource::new(vec![track("de", false), track("en", true), track("en", false)]);
    let fetcher = Fetcher::new(&source);

    let transcript = fetcher.fetch("https://youtu.be/dQw4w9WgXcQ", &FetchOpts::default())?;
    assert_eq!(transcript, "manual en transcript text");
    assert_eq!(
        source.requested.borrow().as_slice(),
        [("dQw4w9WgXcQ".to_owned(), "en".to_owned())]
    );
    Ok(())
}

#[test]
fn falls_back_to_generated_then_first_track() -> anyhow::Result<()> {
    let source = FakeSource::new(vec![track("fr", false), track("en-US", true)]);
    let fetcher = Fetcher::new(&source);
    assert_eq!(
        fetcher.fetch("dQw4w9WgXcQ", &FetchOpts::default())?,
        "auto en-US transcript text"
    );

    let opts = FetchOpts {
        languages: vec!["ja".to_owned()],
        ..FetchOpts::default()
    };
    assert_eq!(fetcher.fetch("dQw4w9WgXcQ", &opts)?, "manual fr transcript text");
    Ok(())
}

#[test]
fn no_tracks_is_an_error() {
    let fetcher = Fetcher::new(FakeSource::new(Vec::new()));
    let err = fetcher
        .fetch("dQw4w9WgXcQ", &FetchOpts::default())
        .unwrap_err();
    assert!(matches!(err, Error::NoTracks { ref video_id } if video_id == "dQw4w9WgXcQ"));
}

#[test]
fn invalid_video_never_reaches_the_source() {
    let source = FakeSource::new(vec![track("en", false)]);
    let fetcher = Fetcher::new(&source);

    let outcome = fetcher.fetch_outcome("https://vimeo.com/1", &FetchOpts::default());
    assert!(!outcome.is_success());
    assert!(source.requested.borrow().is_empty());
}

#[test]
fn enforces_minimum_length() {
    let fetcher = Fetcher::new(FakeSource::new(vec![track("en", false)]));
    let opts = FetchOpts {
        min_transcript_chars: 100,
        ..FetchOpts::default()
    };

    let err = fetcher.fetch("dQw4w9WgXcQ", &opts).unwrap_err();
    assert!(matches!(err, Error::TranscriptTooShort { min: 100, .. }));
}

#[test]
fn source_errors_become_failure_outcomes() {
    let fetcher = Fetcher::new(FailingSource);
    let outcome = fetcher.fetch_outcome("dQw4w9WgXcQ", &FetchOpts::default());
    assert_eq!(
        outcome,
        Outcome::failure("video unavailable: dQw4w9WgXcQ")
    );
}
