use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use crate::models::Distribution;

/// One cached snapshot, tagged with the mtime observed when it was parsed.
/// `mtime` is `None` when the backing file did not exist.
#[derive(Debug, Clone)]
pub struct CachedDistribution {
    pub mtime: Option<SystemTime>,
    pub distribution: Arc<Distribution>,
}

/// Process-lifetime cache of parsed distribution snapshots, keyed by path.
///
/// An entry is only served while the caller-observed modification time
/// matches the one recorded at parse time; any change (including the file
/// appearing or disappearing) is a miss.
#[derive(Debug, Default)]
pub struct DistributionCache {
    entries: RwLock<HashMap<PathBuf, CachedDistribution>>,
}

impl DistributionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path, mtime: Option<SystemTime>) -> Option<Arc<Distribution>> {
        let entries = self.entries.read().ok()?;
        let entry = entries.get(path)?;
        if entry.mtime != mtime {
            return None;
        }
        Some(Arc::clone(&entry.distribution))
    }

    pub fn insert(&self, path: PathBuf, mtime: Option<SystemTime>, distribution: Arc<Distribution>) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(path, CachedDistribution { mtime, distribution });
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}
