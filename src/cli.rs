use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ytchunk",
    about = "Fetch a YouTube transcript, cache it, and split it into LLM-sized chunks",
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Cli {
    /// YouTube video URL or 11-character video ID
    pub url: String,

    /// Maximum characters per chunk
    #[arg(short, long)]
    pub max_chars: Option<usize>,

    /// Preferred caption language, repeatable (default: en)
    #[arg(short, long = "lang")]
    pub langs: Vec<String>,

    /// Cache directory (default: cache/ next to the executable)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Skip the transcript cache entirely
    #[arg(long)]
    pub no_cache: bool,

    /// Show video ID, cache status and chunk count on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
