//! Process-wide deduplication of open index handles.
//!
//! Many logical models can point at the same physical index (language
//! variants sharing a base corpus). The registry guarantees at most one
//! open handle per location and hands out `Arc` clones, so memory stays
//! bounded and no model can tear a handle down under another one.

use crate::error::Result;
use crate::index::IndexHandle;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, RwLock};

/// Registry of open handles keyed by index directory.
///
/// Entries are never evicted automatically; they live until [`clear`]
/// (`HandleRegistry::clear`) or process exit. Path equality is the cache
/// key — two spellings of the same directory are two entries.
#[derive(Default)]
pub struct HandleRegistry {
    handles: RwLock<HashMap<PathBuf, Arc<IndexHandle>>>,
}

impl HandleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the handle for `dir`, opening it if this is the first request.
    ///
    /// Opens are serialized by the write lock, so concurrent callers racing
    /// on a new location still end up sharing one handle.
    pub fn get_or_open(&self, dir: &Path) -> Result<Arc<IndexHandle>> {
        // Fast path with read lock
        {
            let handles = self.handles.read().unwrap();
            if let Some(handle) = handles.get(dir) {
                return Ok(Arc::clone(handle));
            }
        }

        // Open with write lock
        let mut handles = self.handles.write().unwrap();

        // Double-check after acquiring write lock
        if let Some(handle) = handles.get(dir) {
            return Ok(Arc::clone(handle));
        }

        let handle = Arc::new(IndexHandle::open(dir)?);
        handles.insert(dir.to_path_buf(), Arc::clone(&handle));
        Ok(handle)
    }

    /// Number of cached handles.
    pub fn len(&self) -> usize {
        self.handles.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached handle.
    ///
    /// Models already holding handles keep working — they own their `Arc`s.
    /// The underlying readers are released once the last holder is gone.
    pub fn clear(&self) {
        self.handles.write().unwrap().clear();
    }
}

/// The shared per-process registry. Empty at process start; no teardown
/// contract beyond process exit.
pub fn global_registry() -> &'static HandleRegistry {
    static REGISTRY: OnceLock<HandleRegistry> = OnceLock::new();
    REGISTRY.get_or_init(HandleRegistry::new)
}
