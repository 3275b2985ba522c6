use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use eyre::Result;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{Segment, VideoId};

/// Seven days
pub const DEFAULT_TTL: Duration = Duration::from_secs(7 * 24 * 3600);

/// On-disk record for one video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub video_id: VideoId,
    /// Unix seconds; a missing value reads as 0, i.e. long expired
    #[serde(default)]
    pub cached_at: f64,
    pub segments: Vec<Segment>,
}

/// Flat directory of `<video_id>.json` files with a time-to-live.
///
/// There is no locking. Two processes writing the same id race and the last
/// writer wins, which is fine since both hold the same transcript.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
    ttl: Duration,
}

pub fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}

impl CacheStore {
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self { dir: dir.into(), ttl }
    }

    pub fn path_for(&self, video_id: &VideoId) -> PathBuf {
        self.dir.join(format!("{video_id}.json"))
    }

    /// Load cached segments, if present and fresh.
    pub fn get(&self, video_id: &VideoId) -> Option<Vec<Segment>> {
        self.get_at(video_id, unix_now())
    }

    /// Same as [`CacheStore::get`] with an explicit clock. An expired entry is
    /// removed; an unreadable one is a miss and stays on disk.
    pub fn get_at(&self, video_id: &VideoId, now: f64) -> Option<Vec<Segment>> {
        let path = self.path_for(video_id);
        if !path.exists() {
            debug!("Cache miss: {}", path.display());
            return None;
        }

        let entry: CacheEntry = match std::fs::read_to_string(&path)
            .map_err(eyre::Report::from)
            .and_then(|data| serde_json::from_str(&data).map_err(eyre::Report::from))
        {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Ignoring unreadable cache file {}: {e}", path.display());
                return None;
            }
        };

        if now - entry.cached_at > self.ttl.as_secs_f64() {
            debug!("Cache expired: {}", path.display());
            if let Err(e) = std::fs::remove_file(&path) {
                warn!("Failed to remove expired cache file {}: {e}", path.display());
            }
            return None;
        }

        debug!("Cache hit: {} ({} segments)", path.display(), entry.segments.len());
        Some(entry.segments)
    }

    /// Best-effort save; failures are logged and dropped.
    pub fn put(&self, video_id: &VideoId, segments: &[Segment]) {
        self.put_at(video_id, segments, unix_now());
    }

    pub fn put_at(&self, video_id: &VideoId, segments: &[Segment], now: f64) {
        if let Err(e) = self.save(video_id, segments, now) {
            warn!("Failed to cache transcript for {video_id}: {e}");
        }
    }

    fn save(&self, video_id: &VideoId, segments: &[Segment], now: f64) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let entry = CacheEntry {
            video_id: video_id.clone(),
            cached_at: now,
            segments: segments.to_vec(),
        };
        let path = self.path_for(video_id);
        std::fs::write(&path, serde_json::to_string(&entry)?)?;
        debug!("Cached transcript: {}", path.display());
        Ok(())
    }
}
