//! WebVTT → plain text normalization.
//!
//! The pipeline is a single forward pass:
//! raw text → lines → structural/content classification → tag stripping → rolling-caption
//! dedup → space-joined transcript.
//!
//! Callers pick the entry point that matches what they have:
//! - `normalize_str` for text already in memory (infallible)
//! - `normalize_bytes` for undecoded input such as request bodies
//! - `normalize_reader` for any `BufRead`
//! - `normalize_file` for a path, with "missing" reported distinctly
//! - `clean_vtt_file` when a tagged [`Outcome`] is wanted instead of a `Result`

use std::fs;
use std::io::{self, BufRead};
use std::path::Path;

use tracing::debug;

use crate::Result;
use crate::cue_line::cue_text;
use crate::error::Error;
use crate::outcome::Outcome;
use crate::rolling::RollingDedup;

const BOM: char = '\u{feff}';

/// Normalize VTT text held in memory.
///
/// Empty or structure-only documents produce an empty string.
pub fn normalize_str(source: &str) -> String {
    normalize_lines(source.strip_prefix(BOM).unwrap_or(source).lines())
}

/// Normalize raw VTT bytes (e.g. an HTTP request body).
///
/// Input that is not valid UTF-8 is a read failure, like an undecodable file.
pub fn normalize_bytes(source: &[u8]) -> Result<String> {
    let source = std::str::from_utf8(source)
        .map_err(|err| Error::Read(io::Error::new(io::ErrorKind::InvalidData, err)))?;
    Ok(normalize_str(source))
}

/// Normalize VTT text from a line reader.
///
/// The whole input is consumed before a transcript is produced.
pub fn normalize_reader<R: BufRead>(reader: R) -> Result<String> {
    let mut dedup = RollingDedup::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(Error::Read)?;
        let line = if idx == 0 {
            line.strip_prefix(BOM).unwrap_or(&line).to_owned()
        } else {
            line
        };
        if let Some(text) = cue_text(&line) {
            dedup.push(&text);
        }
    }
    Ok(dedup.finish())
}

/// Read and normalize a VTT file.
pub fn normalize_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|err| Error::from_read(err, path))?;
    let transcript = normalize_str(&source);
    debug!(
        path = %path.display(),
        input_bytes = source.len(),
        transcript_chars = transcript.chars().count(),
        "normalized vtt file"
    );
    Ok(transcript)
}

/// Read and normalize a VTT file, folding any failure into an [`Outcome`].
pub fn clean_vtt_file(path: impl AsRef<Path>) -> Outcome {
    normalize_file(path).into()
}

fn normalize_lines<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    let mut dedup = RollingDedup::new();
    for text in lines.filter_map(cue_text) {
        dedup.push(&text);
    }
    dedup.finish()
}
