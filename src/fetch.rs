use log::{debug, info};

use crate::{Error, Result, Segment, VideoId};

/// Language preference used when none is configured
pub const DEFAULT_LANGUAGES: &[&str] = &["en"];

/// One caption track a provider has for a video
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionTrack {
    pub language_code: String,
    pub is_generated: bool,
    pub url: String,
}

/// Failures a captions provider can signal, independent of any backend
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("no transcript in requested languages {requested:?} (available: {available:?})")]
    LanguageNotFound {
        requested: Vec<String>,
        available: Vec<String>,
    },

    #[error("transcripts are disabled")]
    TranscriptsDisabled,

    #[error("video is unavailable")]
    VideoUnavailable,

    #[error("invalid video id")]
    InvalidVideoId,

    #[error("request blocked by YouTube")]
    RequestBlocked,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Parse(String),
}

impl ProviderError {
    /// Terminal category for a first-attempt failure. `LanguageNotFound` is
    /// handled by the fallback before this is reached.
    fn into_error(self, video_id: &VideoId) -> Error {
        match self {
            ProviderError::TranscriptsDisabled => Error::Disabled(video_id.clone()),
            ProviderError::VideoUnavailable => Error::Unavailable(video_id.clone()),
            ProviderError::InvalidVideoId => Error::InvalidId(video_id.clone()),
            ProviderError::RequestBlocked => Error::Blocked,
            ProviderError::LanguageNotFound { .. } => Error::NoCaptions(video_id.clone()),
            e @ (ProviderError::Http(_) | ProviderError::Parse(_)) => Error::Unexpected(e.to_string()),
        }
    }
}

/// Source of caption segments
#[allow(async_fn_in_trait)]
pub trait CaptionProvider {
    /// Fetch the first track matching `languages`, tried in order.
    async fn fetch(&self, video_id: &VideoId, languages: &[String]) -> std::result::Result<Vec<Segment>, ProviderError>;

    /// Every track the video has, in provider order.
    async fn list(&self, video_id: &VideoId) -> std::result::Result<Vec<CaptionTrack>, ProviderError>;

    async fn fetch_track(&self, track: &CaptionTrack) -> std::result::Result<Vec<Segment>, ProviderError>;
}

/// Fetch segments for `video_id`, preferring `languages` and falling back to
/// whatever track the provider lists first. No retries.
pub async fn fetch_transcript<P: CaptionProvider>(
    provider: &P,
    video_id: &VideoId,
    languages: &[String],
) -> Result<Vec<Segment>> {
    match provider.fetch(video_id, languages).await {
        Ok(segments) => return Ok(segments),
        Err(ProviderError::LanguageNotFound { available, .. }) => {
            info!("No transcript in {languages:?} for {video_id}, available: {available:?}");
        }
        Err(e) => {
            debug!("Fetch failed for {video_id}: {e}");
            return Err(e.into_error(video_id));
        }
    }

    match first_available(provider, video_id).await {
        Ok(Some(segments)) => Ok(segments),
        Ok(None) => {
            debug!("No transcripts listed for {video_id}");
            Err(Error::NoCaptions(video_id.clone()))
        }
        Err(e) => {
            debug!("Fallback fetch failed for {video_id}: {e}");
            Err(Error::NoCaptions(video_id.clone()))
        }
    }
}

async fn first_available<P: CaptionProvider>(
    provider: &P,
    video_id: &VideoId,
) -> std::result::Result<Option<Vec<Segment>>, ProviderError> {
    let tracks = provider.list(video_id).await?;
    let Some(track) = tracks.first() else {
        return Ok(None);
    };
    debug!("Falling back to track lang={} generated={}", track.language_code, track.is_generated);
    provider.fetch_track(track).await.map(Some)
}
