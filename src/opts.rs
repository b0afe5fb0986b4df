/// Options that control how a remote transcript is fetched.
///
/// This struct represents *library-level configuration*, not CLI flags directly.
/// The CLI and server map user input into this type so that:
/// - the library remains reusable outside of a CLI context
/// - other frontends (APIs, tests, batch jobs) can construct options programmatically
#[derive(Debug, Clone)]
pub struct FetchOpts {
    /// Preferred caption languages, most preferred first (e.g. `["en", "de"]`).
    pub languages: Vec<String>,

    /// Reject transcripts with fewer characters than this. `0` accepts anything, including an
    /// empty transcript.
    pub min_transcript_chars: usize,
}

impl Default for FetchOpts {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_owned()],
            min_transcript_chars: 0,
        }
    }
}
