use std::path::PathBuf;

use clap::error::ErrorKind;
use eyre::Result;
use log::{debug, info};

mod cli;

use cli::Cli;
use ytchunk::cache::CacheStore;
use ytchunk::config::{self, Config};
use ytchunk::pipeline::Pipeline;
use ytchunk::youtube::YouTubeProvider;

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytchunk.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytchunk")
        .join("logs")
}

fn build_after_help() -> String {
    format!(
        "\nConfig file: {}\nDefault cache: {}\nLogs are written to: {}",
        config::config_path().display(),
        config::default_cache_dir().display(),
        log_dir().join("ytchunk.log").display(),
    )
}

fn parse_cli() -> Cli {
    let cmd = <Cli as clap::CommandFactory>::command().after_help(build_after_help());
    let parsed = cmd
        .try_get_matches()
        .and_then(|m| <Cli as clap::FromArgMatches>::from_arg_matches(&m));

    match parsed {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Config file is optional; a broken one falls back to defaults
    let config = Config::load().unwrap_or_default();

    let languages = if cli.langs.is_empty() { config.languages() } else { cli.langs };
    let max_chars = cli.max_chars.unwrap_or_else(|| config.max_chars());

    let mut pipeline = Pipeline::new(YouTubeProvider::new(reqwest::Client::new()))
        .with_languages(languages)
        .with_max_chars(max_chars);

    if cli.no_cache {
        debug!("Cache disabled");
    } else {
        let cache_dir = cli.cache_dir.unwrap_or_else(|| config.cache_dir());
        debug!("Cache dir: {}", cache_dir.display());
        pipeline = pipeline.with_cache(CacheStore::new(cache_dir, config.cache_ttl()));
    }

    let result = pipeline.run(&cli.url).await?;

    if cli.verbose {
        eprintln!(
            "Video: {}\nCache: {}\nChunks: {}",
            result.video_id,
            if result.from_cache { "hit" } else { "miss" },
            result.chunks.len(),
        );
    }

    println!("{}", result.render()?);
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = parse_cli();

    // Not fatal: an unwritable log dir still prints the transcript
    let _ = setup_logging();

    if let Err(e) = run(cli).await {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    }
}
