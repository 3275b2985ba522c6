pub mod cache;
pub mod chunk;
pub mod config;
pub mod error;
pub mod fetch;
pub mod output;
pub mod pipeline;
pub mod youtube;

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub use error::{Error, Result};

/// A single captioned segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Canonical 11-character YouTube video identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

static BARE_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]{11}$").expect("bare id pattern"));

// Order matters: first match wins.
static URL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // youtube.com/watch?v=ID (v may follow other params)
        r"(?:https?://)?(?:www\.)?youtube\.com/watch\?.*v=([a-zA-Z0-9_-]{11})",
        // youtu.be/ID
        r"(?:https?://)?youtu\.be/([a-zA-Z0-9_-]{11})",
        // youtube.com/shorts/ID
        r"(?:https?://)?(?:www\.)?youtube\.com/shorts/([a-zA-Z0-9_-]{11})",
        // youtube.com/embed/ID
        r"(?:https?://)?(?:www\.)?youtube\.com/embed/([a-zA-Z0-9_-]{11})",
        // youtube.com/live/ID
        r"(?:https?://)?(?:www\.)?youtube\.com/live/([a-zA-Z0-9_-]{11})",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("url pattern"))
    .collect()
});

impl VideoId {
    /// Accepts only a bare 11-character id, no URL forms.
    pub fn parse(s: &str) -> Option<Self> {
        BARE_ID.is_match(s).then(|| Self(s.to_string()))
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

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VideoId {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid video id: {value}"))
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}

/// Extract video ID from various YouTube URL formats
pub fn extract_video_id(input: &str) -> Result<VideoId> {
    let input = input.trim();

    if let Some(id) = VideoId::parse(input) {
        return Ok(id);
    }

    URL_PATTERNS
        .iter()
        .find_map(|re| re.captures(input))
        .map(|caps| VideoId(caps[1].to_string()))
        .ok_or_else(|| Error::InvalidInput(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    fn extracted(input: &str) -> String {
        extract_video_id(input).unwrap().to_string()
    }

    #[test]
    fn test_bare_video_id() {
        assert_eq!(extracted(ID), ID);
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(extracted("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), ID);
    }

    #[test]
    fn test_watch_url_with_extra_params() {
        assert_eq!(extracted("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=120"), ID);
        assert_eq!(extracted("https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ"), ID);
    }

    #[test]
    fn test_watch_url_without_scheme() {
        assert_eq!(extracted("youtube.com/watch?v=dQw4w9WgXcQ"), ID);
    }

    #[test]
    fn test_short_url() {
        assert_eq!(extracted("https://youtu.be/dQw4w9WgXcQ"), ID);
        assert_eq!(extracted("https://youtu.be/dQw4w9WgXcQ?t=5"), ID);
        assert_eq!(extracted("youtu.be/dQw4w9WgXcQ?si=abc"), ID);
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(extracted("https://www.youtube.com/embed/dQw4w9WgXcQ"), ID);
    }

    #[test]
    fn test_shorts_url() {
        assert_eq!(extracted("https://www.youtube.com/shorts/dQw4w9WgXcQ"), ID);
    }

    #[test]
    fn test_live_url() {
        assert_eq!(extracted("https://www.youtube.com/live/dQw4w9WgXcQ?feature=shared"), ID);
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(extract_video_id("not-a-valid-id"), Err(Error::InvalidInput(_))));
        assert!(matches!(extract_video_id("dQw4w9WgXc"), Err(Error::InvalidInput(_))));
        assert!(matches!(extract_video_id("dQw4w9WgXcQQ"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_url_missing_id() {
        assert!(extract_video_id("https://www.youtube.com/watch?v=").is_err());
        assert!(extract_video_id("https://youtu.be/").is_err());
        assert!(extract_video_id("https://www.youtube.com/shorts/").is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(extract_video_id(""), Err(Error::InvalidInput(s)) if s.is_empty()));
    }

    #[test]
    fn test_whitespace_trimming() {
        assert_eq!(extracted("  dQw4w9WgXcQ  "), ID);
        assert_eq!(extracted("\thttps://youtu.be/dQw4w9WgXcQ\n"), ID);
    }

    #[test]
    fn test_video_id_serde() {
        let id = VideoId::parse(ID).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"dQw4w9WgXcQ\"");
        let back: VideoId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<VideoId>("\"short\"").is_err());
    }
}
