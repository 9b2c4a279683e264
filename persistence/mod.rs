/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Key-value blob persistence boundary.
//!
//! The session writes the whole graph (and the saved-view list) as JSON
//! blobs under namespaced workspace keys. The in-memory state stays
//! authoritative; a failed write is reported and retried on the next
//! mutation, never treated as fatal.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

pub mod types;

/// Namespace prefix for all workspace blobs.
pub const WORKSPACE_PREFIX: &str = "graphview.workspace";

/// Key holding a workspace's graph dataset.
pub fn graph_key(workspace_id: &str) -> String {
    format!("{WORKSPACE_PREFIX}.{workspace_id}.graph")
}

/// Key holding a workspace's saved-view list.
pub fn views_key(workspace_id: &str) -> String {
    format!("{WORKSPACE_PREFIX}.{workspace_id}.views")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    /// The backing store rejected the read or write.
    Io(String),
    /// A blob exists but does not parse as the expected document.
    Corrupt(String),
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistError::Io(e) => write!(f, "Persistence I/O error: {e}"),
            PersistError::Corrupt(e) => write!(f, "Persisted blob is corrupt: {e}"),
        }
    }
}

pub type PersistResult<T> = Result<T, PersistError>;

/// Minimal string-keyed blob store. `read` returns `Ok(None)` for a key
/// that was never written; only genuine store failures are errors.
pub trait BlobStore: Send + Sync {
    fn read(&self, key: &str) -> PersistResult<Option<String>>;

    fn write(&self, key: &str, value: &str) -> PersistResult<()>;

    fn remove(&self, key: &str) -> PersistResult<()>;
}

/// In-process blob store for tests and ephemeral sessions. Write faults
/// can be injected to exercise the degraded-persistence path.
#[derive(Default)]
pub struct MemoryBlobStore {
    entries: Mutex<BTreeMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail until switched back off.
    pub fn set_write_fault(&self, enabled: bool) {
        self.fail_writes.store(enabled, Ordering::SeqCst);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> PersistResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> PersistResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistError::Io("injected write fault".to_string()));
        }
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> PersistResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// Blob store over a directory, one file per key. Keys are sanitized so a
/// key can never escape the root directory.
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> PersistResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| PersistError::Io(e.to_string()))?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{name}.json"))
    }
}

impl BlobStore for FileBlobStore {
    fn read(&self, key: &str) -> PersistResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistError::Io(e.to_string())),
        }
    }

    fn write(&self, key: &str, value: &str) -> PersistResult<()> {
        fs::write(self.path_for(key), value).map_err(|e| PersistError::Io(e.to_string()))
    }

    fn remove(&self, key: &str) -> PersistResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistError::Io(e.to_string())),
        }
    }
}
