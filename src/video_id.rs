//! YouTube video identifier parsing.

use std::sync::OnceLock;

use regex::Regex;

fn id_in_url() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:youtube\.com/(?:watch\?(?:.*&)?v=|embed/|shorts/)|youtu\.be/)([A-Za-z0-9_-]{11})")
            .expect("video id pattern must be valid")
    })
}

fn full_url() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?:https?://)?(?:www\.|m\.)?(?:youtube\.com/(?:watch\?v=|embed/|shorts/)|youtu\.be/)[\w-]{11}(?:[?&#].*)?$",
        )
        .expect("video url pattern must be valid")
    })
}

fn bare_id() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("bare id pattern must be valid"))
}

/// Extract the 11-character video id from a YouTube URL.
pub fn extract_video_id(url: &str) -> Option<&str> {
    id_in_url()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether `url` is a well-formed YouTube watch/embed/shorts/short-link URL.
pub fn is_valid_video_url(url: &str) -> bool {
    full_url().is_match(url.trim())
}

/// Accept either a YouTube URL or a bare video id.
pub fn resolve_video_id(input: &str) -> Option<&str> {
    let input = input.trim();
    if bare_id().is_match(input) {
        return Some(input);
    }
    extract_video_id(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_common_url_shapes() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
        ] {
            assert_eq!(extract_video_id(url), Some("dQw4w9WgXcQ"), "{url}");
        }
    }

    #[test]
    fn rejects_foreign_urls() {
        assert_eq!(extract_video_id("https://vimeo.com/123456789"), None);
        assert!(!is_valid_video_url("https://vimeo.com/123456789"));
    }

    #[test]
    fn validates_full_urls() {
        assert!(is_valid_video_url("youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_valid_video_url("https://youtu.be/dQw4w9WgXcQ?si=abc"));
        assert!(!is_valid_video_url("https://youtu.be/short"));
    }

    #[test]
    fn resolves_bare_ids_and_urls() {
        assert_eq!(resolve_video_id(" dQw4w9WgXcQ "), Some("dQw4w9WgXcQ"));
        assert_eq!(
            resolve_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(resolve_video_id("not a video"), None);
    }
}
