use crate::VideoId;

/// Every way the transcript pipeline can fail. Each variant renders as the
/// sentence shown to the user on stderr.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "Could not extract a YouTube video ID from: {0}\n\
         Supported formats:\n  \
         - https://www.youtube.com/watch?v=VIDEO_ID\n  \
         - https://youtu.be/VIDEO_ID\n  \
         - https://youtube.com/shorts/VIDEO_ID\n  \
         - https://youtube.com/embed/VIDEO_ID\n  \
         - https://youtube.com/live/VIDEO_ID\n  \
         - A plain 11-character video ID"
    )]
    InvalidInput(String),

    #[error("'{0}' is not a valid YouTube video ID.")]
    InvalidId(VideoId),

    #[error("Transcripts are disabled for video '{0}'. The video owner has turned off captions.")]
    Disabled(VideoId),

    #[error("Video '{0}' is unavailable. It may be private, deleted, or region-restricted.")]
    Unavailable(VideoId),

    #[error("YouTube is blocking requests right now. This is usually temporary, please try again in a few minutes.")]
    Blocked,

    #[error("Could not fetch any transcript for video '{0}'. The video may not have captions/subtitles available.")]
    NoCaptions(VideoId),

    #[error("Transcript was fetched but appears to be empty.")]
    EmptyTranscript,

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

pub type Result<T> = std::result::Result<T, Error>;
