//! Video reference resolution.
//!
//! Parses a user-supplied URL (or bare token) into the canonical
//! 11-character video id. Pure string work, no network, same input
//! always yields the same output.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recognized URL shapes, tried in order. Each anchors an 11-character
/// id of URL-safe identifier characters.
const URL_PATTERNS: &[&str] = &[
    // canonical watch URL, id anywhere in the query string
    r"(?:https?://)?(?:www\.|m\.)?youtube\.com/watch\?(?:[^\s#]*&)?v=([A-Za-z0-9_-]{11})",
    // short-link form
    r"(?:https?://)?(?:www\.)?youtu\.be/([A-Za-z0-9_-]{11})",
    // embed form
    r"(?:https?://)?(?:www\.|m\.)?youtube\.com/embed/([A-Za-z0-9_-]{11})",
    // shorts form
    r"(?:https?://)?(?:www\.|m\.)?youtube\.com/shorts/([A-Za-z0-9_-]{11})",
    // bare token
    r"^([A-Za-z0-9_-]{11})$",
];

/// Canonical identifier for a video, extracted from a user-supplied URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoId(String);

impl VideoId {
    /// Resolve a URL or bare token into a video id.
    ///
    /// The first matching shape wins; `None` means the input is not a
    /// recognizable video reference.
    pub fn resolve(input: &str) -> Option<Self> {
        let input = input.trim();
        for pattern in URL_PATTERNS {
            let re = Regex::new(pattern).unwrap();
            if let Some(caps) = re.captures(input) {
                return Some(Self(caps[1].to_string()));
            }
        }
        None
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    #[test]
    fn resolves_all_supported_url_shapes() {
        let urls = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "http://youtube.com/watch?v=dQw4w9WgXcQ",
            "youtube.com/watch?v=dQw4w9WgXcQ",
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
        ];
        for url in urls {
            let resolved = VideoId::resolve(url);
            assert_eq!(
                resolved.as_ref().map(VideoId::as_str),
                Some(ID),
                "failed for: {url}"
            );
        }
    }

    #[test]
    fn surrounding_query_parameters_are_ignored() {
        let urls = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://www.youtube.com/watch?app=desktop&v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?si=MYURGRIG6Fj",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ?feature=share",
        ];
        for url in urls {
            assert_eq!(
                VideoId::resolve(url).as_ref().map(VideoId::as_str),
                Some(ID),
                "failed for: {url}"
            );
        }
    }

    #[test]
    fn bare_tokens_are_accepted() {
        assert_eq!(
            VideoId::resolve("dQw4w9WgXcQ").as_ref().map(VideoId::as_str),
            Some(ID)
        );
        assert_eq!(
            VideoId::resolve("  dQw4w9WgXcQ  ").as_ref().map(VideoId::as_str),
            Some(ID)
        );
    }

    #[test]
    fn unrecognizable_input_is_rejected() {
        let inputs = [
            "",
            "not a url at all",
            "https://example.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/channel/UCuAXFkgsw1L7xaCfnd5JJOw",
            "https://www.youtube.com/watch?v=tooshort",
            "dQw4w9WgXcQtoolong",
        ];
        for input in inputs {
            assert_eq!(VideoId::resolve(input), None, "should reject: {input}");
        }
    }

    #[test]
    fn resolution_is_deterministic() {
        let url = "https://youtu.be/dQw4w9WgXcQ";
        assert_eq!(VideoId::resolve(url), VideoId::resolve(url));
    }
}
