//! Response snapshots for resource listings.
//!
//! The last successful payload per resource is kept on disk so a view can
//! fall back to recent data when the manager is unreachable. Snapshots are
//! advisory only: concurrent invocations are not coordinated and the last
//! write wins.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

/// Snapshot TTL in seconds (15 minutes)
const SNAPSHOT_TTL_SECS: u64 = 15 * 60;

/// Resource keys the console snapshots under.
pub mod resource {
    pub const AGENTS: &str = "agents";
    pub const ALERTS: &str = "alerts";
    pub const RULES: &str = "rules";
    pub const CASES: &str = "cases";
    pub const DASHBOARD_STATS: &str = "dashboard-stats";
}

pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Default snapshot directory under the user cache directory.
    pub fn default_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join("siemplus")
            .join("snapshots")
    }

    /// Save the latest payload for a resource. Best-effort: a write
    /// failure is logged and the fetch result still stands.
    pub fn store<T: Serialize>(&self, resource: &str, value: &T) {
        if let Err(e) = self.try_store(resource, value) {
            warn!("Failed to snapshot {}: {}", resource, e);
        }
    }

    fn try_store<T: Serialize>(&self, resource: &str, value: &T) -> anyhow::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string_pretty(value)?;
        let path = self.snapshot_path(resource);
        fs::write(&path, content)?;
        debug!("Snapshotted {} to {:?}", resource, path);
        Ok(())
    }

    /// Load a still-valid snapshot, returning the payload and its age.
    pub fn load<T: DeserializeOwned>(&self, resource: &str) -> Option<(T, Duration)> {
        let path = self.snapshot_path(resource);
        if !path.exists() {
            return None;
        }

        let modified = fs::metadata(&path).ok()?.modified().ok()?;
        let age = SystemTime::now().duration_since(modified).ok()?;
        if age.as_secs() > SNAPSHOT_TTL_SECS {
            debug!("Snapshot for {} expired ({}s old)", resource, age.as_secs());
            return None;
        }

        let content = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(value) => Some((value, age)),
            Err(e) => {
                warn!("Ignoring corrupt snapshot for {}: {}", resource, e);
                None
            }
        }
    }

    /// Remove every snapshot. Returns how many were removed.
    pub fn invalidate_all(&self) -> std::io::Result<usize> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };

        let mut removed = 0;
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn snapshot_path(&self, resource: &str) -> PathBuf {
        self.dir.join(format!("{}.json", resource))
    }
}
