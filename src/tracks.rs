//! Caption track selection and entry joining.

use crate::source::{CaptionEntry, CaptionTrack};

/// Pick the track to transcribe.
///
/// Preference order:
/// 1. a manually created track in one of `languages` (earlier languages win)
/// 2. a generated track in one of `languages`
/// 3. whatever track comes first
pub fn select_track<'a>(
    tracks: &'a [CaptionTrack],
    languages: &[String],
) -> Option<&'a CaptionTrack> {
    let find = |generated: bool| {
        languages.iter().find_map(|lang| {
            tracks
                .iter()
                .find(|t| t.is_generated == generated && language_matches(&t.language_code, lang))
        })
    };

    find(false).or_else(|| find(true)).or_else(|| tracks.first())
}

/// Whether a track's language code satisfies a requested language.
///
/// Comparison is case-insensitive, and a bare primary subtag matches any region (`en` accepts
/// `en-US` and `en_GB`).
pub fn language_matches(track_code: &str, wanted: &str) -> bool {
    let track_code = track_code.trim();
    let wanted = wanted.trim();
    if track_code.is_empty() || wanted.is_empty() {
        return false;
    }
    if track_code.eq_ignore_ascii_case(wanted) {
        return true;
    }
    if wanted.contains(['-', '_']) {
        return false;
    }
    primary_subtag(track_code).eq_ignore_ascii_case(wanted)
}

fn primary_subtag(code: &str) -> &str {
    code.split(['-', '_']).next().unwrap_or(code)
}

/// Join entry texts into one transcript string.
pub fn join_entries(entries: &[CaptionEntry]) -> String {
    entries
        .iter()
        .map(|e| e.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(code: &str, generated: bool) -> CaptionTrack {
        CaptionTrack {
            language_code: code.to_owned(),
            language: code.to_owned(),
            is_generated: generated,
        }
    }

    fn langs(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn prefers_manual_over_generated() {
        let tracks = [track("en", true), track("en", false)];
        let picked = select_track(&tracks, &langs(&["en"])).expect("track");
        assert!(!picked.is_generated);
    }

    #[test]
    fn manual_in_any_language_beats_generated_in_first_language() {
        let tracks = [track("en", true), track("de", false)];
        let picked = select_track(&tracks, &langs(&["en", "de"])).expect("track");
        assert_eq!(picked.language_code, "de");
    }

    #[test]
    fn falls_back_to_generated_then_first() {
        let tracks = [track("fr", false), track("en", true)];
        let picked = select_track(&tracks, &langs(&["en"])).expect("track");
        assert_eq!(picked.language_code, "en");
        assert!(picked.is_generated);

        let picked = select_track(&tracks, &langs(&["ja"])).expect("track");
        assert_eq!(picked.language_code, "fr");

        assert!(select_track(&[], &langs(&["en"])).is_none());
    }

    #[test]
    fn language_matching_rules() {
        assert!(language_matches("en-US", "en"));
        assert!(language_matches("EN", "en"));
        assert!(language_matches("en_GB", "en"));
        assert!(!language_matches("en", "en-US"));
        assert!(!language_matches("", "en"));
        assert!(!language_matches("es", "en"));
    }

    #[test]
    fn joins_trimmed_non_empty_entries() {
        let entries = [
            CaptionEntry::new(" hello "),
            CaptionEntry::new(""),
            CaptionEntry::new("world\n"),
        ];
        assert_eq!(join_entries(&entries), "hello world");
        assert_eq!(join_entries(&[]), "");
    }
}
