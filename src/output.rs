use serde::Serialize;

use crate::{Error, Result, Segment, VideoId};

const CHUNKED_NOTE: &str = "This transcript was split into chunks because the video is long. Process all chunks.";

/// JSON envelope printed when a transcript needs more than one chunk
#[derive(Debug, Serialize)]
pub struct ChunkBundle<'a> {
    pub video_id: &'a VideoId,
    pub total_chunks: usize,
    pub note: &'a str,
    pub chunks: &'a [String],
}

/// Seconds to `MM:SS`, or `HH:MM:SS` from one hour up. Fractions are truncated.
pub fn format_timestamp(seconds: f64) -> String {
    // `as` saturates: negatives and NaN become 0
    let total = seconds as u64;
    let hrs = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;

    if hrs > 0 {
        format!("{hrs:02}:{mins:02}:{secs:02}")
    } else {
        format!("{mins:02}:{secs:02}")
    }
}

/// Render segments as `[TS] text` lines, skipping segments with blank text
pub fn format_transcript(segments: &[Segment]) -> String {
    segments
        .iter()
        .filter_map(|s| {
            let text = s.text.trim();
            (!text.is_empty()).then(|| format!("[{}] {text}", format_timestamp(s.start)))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A single chunk prints as-is; several are wrapped in a [`ChunkBundle`].
pub fn render_chunks(video_id: &VideoId, chunks: &[String]) -> Result<String> {
    if let [only] = chunks {
        return Ok(only.clone());
    }

    let bundle = ChunkBundle {
        video_id,
        total_chunks: chunks.len(),
        note: CHUNKED_NOTE,
        chunks,
    };
    serde_json::to_string_pretty(&bundle).map_err(|e| Error::Unexpected(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(text: &str, start: f64) -> Segment {
        Segment {
            text: text.to_string(),
            start,
            duration: 1.0,
        }
    }

    #[test]
    fn test_format_timestamp_minutes() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(65.0), "01:05");
        assert_eq!(format_timestamp(3599.99), "59:59");
    }

    #[test]
    fn test_format_timestamp_hours() {
        assert_eq!(format_timestamp(3600.0), "01:00:00");
        assert_eq!(format_timestamp(3661.0), "01:01:01");
        assert_eq!(format_timestamp(36000.5), "10:00:00");
    }

    #[test]
    fn test_format_timestamp_truncates() {
        assert_eq!(format_timestamp(5.999), "00:05");
    }

    #[test]
    fn test_format_transcript() {
        assert_eq!(format_transcript(&[seg("hi", 65.0)]), "[01:05] hi");
        assert_eq!(format_transcript(&[seg("hi", 3661.0)]), "[01:01:01] hi");
    }

    #[test]
    fn test_format_transcript_trims_and_drops_blank() {
        let segments = vec![seg("  hello ", 0.0), seg("   ", 1.0), seg("", 2.0), seg("world\n", 3.2)];
        assert_eq!(format_transcript(&segments), "[00:00] hello\n[00:03] world");
    }

    #[test]
    fn test_format_transcript_empty() {
        assert_eq!(format_transcript(&[]), "");
        assert_eq!(format_transcript(&[seg(" \t", 0.0)]), "");
    }

    #[test]
    fn test_render_single_chunk_is_plain() {
        let id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        let chunks = vec!["[00:00] hello".to_string()];
        assert_eq!(render_chunks(&id, &chunks).unwrap(), "[00:00] hello");
    }

    #[test]
    fn test_render_many_chunks_is_json() {
        let id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        let chunks = vec!["a".to_string(), "b".to_string()];
        let rendered = render_chunks(&id, &chunks).unwrap();

        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(json["video_id"], "dQw4w9WgXcQ");
        assert_eq!(json["total_chunks"], 2);
        assert_eq!(json["note"], CHUNKED_NOTE);
        assert_eq!(json["chunks"], serde_json::json!(["a", "b"]));
        assert!(rendered.starts_with("{\n  \"video_id\""));
    }
}
