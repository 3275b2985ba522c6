use log::{debug, info};

use crate::cache::CacheStore;
use crate::chunk::{DEFAULT_MAX_CHARS, chunk_transcript};
use crate::fetch::{CaptionProvider, DEFAULT_LANGUAGES, fetch_transcript};
use crate::output::{format_transcript, render_chunks};
use crate::{Error, Result, Segment, VideoId, extract_video_id};

/// Result of one run: the transcript split into chunks
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkedTranscript {
    pub video_id: VideoId,
    pub chunks: Vec<String>,
    pub from_cache: bool,
}

impl ChunkedTranscript {
    /// Text to print on stdout
    pub fn render(&self) -> Result<String> {
        render_chunks(&self.video_id, &self.chunks)
    }
}

/// Extract → cache → fetch → format → chunk
pub struct Pipeline<P> {
    provider: P,
    cache: Option<CacheStore>,
    languages: Vec<String>,
    max_chars: usize,
}

impl<P: CaptionProvider> Pipeline<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            cache: None,
            languages: DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect(),
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    pub fn with_cache(mut self, cache: CacheStore) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Cached segments if fresh, otherwise fetched and written back.
    /// Returns whether the cache answered.
    pub async fn segments(&self, video_id: &VideoId) -> Result<(Vec<Segment>, bool)> {
        if let Some(segments) = self.cache.as_ref().and_then(|c| c.get(video_id)) {
            return Ok((segments, true));
        }

        let segments = fetch_transcript(&self.provider, video_id, &self.languages).await?;
        info!("Fetched {} segments for {video_id}", segments.len());

        if let Some(cache) = &self.cache {
            cache.put(video_id, &segments);
        }
        Ok((segments, false))
    }

    pub async fn run(&self, input: &str) -> Result<ChunkedTranscript> {
        let video_id = extract_video_id(input)?;
        debug!("Resolved {input:?} to {video_id}");

        let (segments, from_cache) = self.segments(&video_id).await?;

        let formatted = format_transcript(&segments);
        if formatted.is_empty() {
            return Err(Error::EmptyTranscript);
        }

        let chunks = chunk_transcript(&formatted, self.max_chars);
        debug!("Split {} chars into {} chunk(s)", formatted.chars().count(), chunks.len());

        Ok(ChunkedTranscript {
            video_id,
            chunks,
            from_cache,
        })
    }
}
