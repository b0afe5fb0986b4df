//! Per-line classification and markup removal for WebVTT caption text.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

/// Marker that opens every WebVTT file.
pub const HEADER_MARKER: &str = "WEBVTT";

/// Separator between the start and end timestamps of a cue timing line.
pub const TIMING_SEPARATOR: &str = "-->";

/// Metadata line prefixes emitted in the header block (e.g. by YouTube auto-captions).
pub const METADATA_PREFIXES: &[&str] = &["Kind:", "Language:"];

/// What a single (already trimmed) VTT line carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Blank separator between cue blocks.
    Blank,

    /// The `WEBVTT` header line.
    Header,

    /// `Kind:` / `Language:` metadata.
    Metadata,

    /// A cue timing line (`00:00:01.000 --> 00:00:02.000 ...`).
    Timing,

    /// Candidate caption text; may still turn out empty once markup is stripped.
    Text,
}

impl LineKind {
    /// Whether the line carries format metadata or timing rather than transcript content.
    pub fn is_structural(self) -> bool {
        !matches!(self, Self::Text)
    }
}

/// Classify a trimmed line.
///
/// Only the presence of `-->` is checked for timing lines; the timestamp syntax itself is not
/// validated.
pub fn classify_line(line: &str) -> LineKind {
    if line.is_empty() {
        LineKind::Blank
    } else if line.starts_with(HEADER_MARKER) {
        LineKind::Header
    } else if METADATA_PREFIXES.iter().any(|p| line.starts_with(p)) {
        LineKind::Metadata
    } else if line.contains(TIMING_SEPARATOR) {
        LineKind::Timing
    } else {
        LineKind::Text
    }
}

/// Remove every `<...>` span from a caption line.
///
/// This covers styling tags (`<c>`, `<i>`, `<v Speaker>`) as well as karaoke-style per-word
/// timestamps (`<00:00:01.234>`). An unterminated `<` swallows the rest of the line and a stray
/// `>` is dropped, so the result never contains either bracket.
///
/// The input is returned borrowed when it contains no brackets at all.
pub fn strip_tags(line: &str) -> Cow<'_, str> {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let re = TAG.get_or_init(|| Regex::new(r"<[^>]*>?|>").expect("tag pattern must be valid"));
    re.replace_all(line, "")
}

/// Turn a raw line into cleaned cue text, or `None` if it carries no transcript content.
pub fn cue_text(raw: &str) -> Option<String> {
    let line = raw.trim();
    if classify_line(line).is_structural() {
        return None;
    }

    let stripped = strip_tags(line);
    let cleaned = stripped.trim();
    if cleaned.is_empty() {
        return None;
    }

    Some(cleaned.to_owned())
}
