//! Time-bounded cache for the selected model id.
//!
//! A single slot, not keyed by catalog contents: a catalog that changes inside the
//! window is only re-evaluated once the slot expires.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

const CACHE_FILE: &str = "selected_model.json";

/// Storage for the most recent model selection.
pub trait SelectionCache: Send + Sync {
    /// The cached id, if one was stored and has not expired.
    fn get(&self) -> Option<String>;
    /// Replace the slot; the value is served until `expires_at`.
    fn set(&self, model: String, expires_at: SystemTime);
}

#[derive(Debug, Clone)]
struct CachedSelection {
    model: String,
    expires_at: SystemTime,
}

/// In-memory [`SelectionCache`]. Id and expiry are read and written together under one lock.
#[derive(Debug, Default)]
pub struct TimedSlot {
    slot: Mutex<Option<CachedSelection>>,
}

impl TimedSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<CachedSelection>> {
        // A poisoned slot still holds a consistent pair: it is only ever replaced whole.
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SelectionCache for TimedSlot {
    fn get(&self) -> Option<String> {
        let slot = self.lock();
        let cached = slot.as_ref()?;
        if SystemTime::now() < cached.expires_at {
            Some(cached.model.clone())
        } else {
            None
        }
    }

    fn set(&self, model: String, expires_at: SystemTime) {
        *self.lock() = Some(CachedSelection { model, expires_at });
    }
}

#[derive(Serialize, Deserialize)]
struct StoredSelection {
    scope: String,
    model: String,
    expires_at: u64,
}

/// On-disk [`SelectionCache`] shared by every run that points at the same directory.
///
/// `scope` identifies the endpoint and preference list the selection was made for;
/// a file written under another scope is a miss. Unreadable or corrupt files are
/// misses too, and write failures only log: the cache never fails an organize call.
#[derive(Debug)]
pub struct FileSlot {
    path: PathBuf,
    scope: String,
    write_lock: Mutex<()>,
}

impl FileSlot {
    pub fn new(dir: &Path, scope: impl Into<String>) -> Self {
        Self {
            path: dir.join(CACHE_FILE),
            scope: scope.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Option<StoredSelection> {
        let data = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&data) {
            Ok(stored) => Some(stored),
            Err(e) => {
                log::debug!("Ignoring corrupt model cache {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Write through a temp file and rename, so readers see the old or the new pair.
    fn write(&self, stored: &StoredSelection) -> io::Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self
            .path
            .with_file_name(format!("{}.{}.tmp", CACHE_FILE, std::process::id()));
        let json = serde_json::to_string_pretty(stored)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)
    }
}

fn unix_secs(t: SystemTime) -> Option<u64> {
    t.duration_since(UNIX_EPOCH).ok().map(|d| d.as_secs())
}

impl SelectionCache for FileSlot {
    fn get(&self) -> Option<String> {
        let stored = self.read()?;
        if stored.scope != self.scope {
            log::debug!("Model cache was written for another endpoint; ignoring it");
            return None;
        }
        let now = unix_secs(SystemTime::now())?;
        (now < stored.expires_at).then_some(stored.model)
    }

    fn set(&self, model: String, expires_at: SystemTime) {
        let Some(expires_at) = unix_secs(expires_at) else {
            return;
        };
        let stored = StoredSelection {
            scope: self.scope.clone(),
            model,
            expires_at,
        };
        if let Err(e) = self.write(&stored) {
            log::warn!("Could not write model cache {}: {}", self.path.display(), e);
        }
    }
}
