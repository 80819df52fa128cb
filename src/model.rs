//! The public lookup surface: a model bound to one n-gram index tree.
//!
//! An [`NGramModel`] validates a top-level directory laid out as
//! `1grams/`..`4grams/`, binds each size present to an open
//! [`IndexHandle`] through the shared registry, and answers frequency
//! queries. Construction either yields a ready model or fails; there are
//! no partially-initialized states to observe.
//!
//! ```no_run
//! use ngq::NGramModel;
//! use std::path::Path;
//!
//! # fn main() -> ngq::Result<()> {
//! let model = NGramModel::open(Path::new("/data/ngram-index/en"))?;
//! let occurrences = model.count(&["good", "morning"])?;
//! let corpus_size = model.total_token_count()?;
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use crate::index::{global_registry, HandleRegistry, IndexHandle, TOTAL_TOKEN_COUNT_FIELD};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Smallest n-gram size an index tree can carry.
pub const MIN_NGRAM_SIZE: usize = 1;
/// Largest n-gram size an index tree can carry. `4grams` is optional.
pub const MAX_NGRAM_SIZE: usize = 4;

/// How many of the size subdirectories must exist for a valid layout
/// (all of `1grams`, `2grams`, `3grams`).
const REQUIRED_SUBDIRS: usize = 3;

/// Cap on `totalTokenCount` meta documents read in one scan. Real corpora
/// shard into far fewer; an unbounded scan over a corrupted index could
/// exhaust memory.
const META_SCAN_CAP: usize = 1000;

/// Name of the per-size index subdirectory, e.g. `3grams`.
fn size_subdir(size: usize) -> String {
    format!("{size}grams")
}

/// A read-only n-gram frequency model over one top-level index directory.
///
/// Models are cheap: handles are shared process-wide, so constructing many
/// models over the same physical index opens each index once. Dropping a
/// model releases its references; the underlying readers close when the
/// last holder (including the registry) lets go.
pub struct NGramModel {
    top_dir: PathBuf,
    handles: BTreeMap<usize, Arc<IndexHandle>>,
}

impl NGramModel {
    /// Check that `top_dir` looks like an n-gram index tree: an existing
    /// directory containing all of the `1grams`, `2grams`, `3grams`
    /// subdirectories.
    pub fn validate(top_dir: &Path) -> Result<()> {
        if !top_dir.is_dir() {
            return Err(Error::InvalidLayout(top_dir.to_path_buf()));
        }
        let mut found = Vec::new();
        for entry in std::fs::read_dir(top_dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if matches!(name, "1grams" | "2grams" | "3grams") {
                found.push(name.to_string());
            }
        }
        if found.len() < REQUIRED_SUBDIRS {
            found.sort();
            return Err(Error::MissingSubdirs {
                dir: top_dir.to_path_buf(),
                found,
            });
        }
        Ok(())
    }

    /// Validate `top_dir` and bind every size subdirectory present, using
    /// the process-wide handle registry.
    pub fn open(top_dir: &Path) -> Result<Self> {
        Self::open_with(global_registry(), top_dir)
    }

    /// Like [`open`](Self::open), but with an explicit registry. Tests and
    /// embedders that want isolated handle lifetimes use this.
    pub fn open_with(registry: &HandleRegistry, top_dir: &Path) -> Result<Self> {
        Self::validate(top_dir)?;
        let mut model = Self {
            top_dir: top_dir.to_path_buf(),
            handles: BTreeMap::new(),
        };
        for size in MIN_NGRAM_SIZE..=MAX_NGRAM_SIZE {
            model.bind(registry, size)?;
        }
        // Validation already guarantees three subdirectories, but a racing
        // delete between validate and bind would otherwise go unnoticed.
        if model.handles.is_empty() {
            return Err(Error::NoIndexesFound(model.top_dir));
        }
        Ok(model)
    }

    fn bind(&mut self, registry: &HandleRegistry, size: usize) -> Result<()> {
        let dir = self.top_dir.join(size_subdir(size));
        if !dir.is_dir() {
            return Ok(());
        }
        if self.handles.contains_key(&size) {
            return Err(Error::DuplicateBinding(size));
        }
        let handle = registry.get_or_open(&dir)?;
        self.handles.insert(size, handle);
        Ok(())
    }

    /// Occurrence count of the exact token sequence in the corpus.
    ///
    /// Token order matters: `["good", "morning"]` and `["morning", "good"]`
    /// are different terms. The sequence length selects the index, so a
    /// 2-token query is answered only by the `2grams` index; asking for a
    /// length with no bound index is a caller error, not a zero.
    pub fn count<S: AsRef<str>>(&self, tokens: &[S]) -> Result<u64> {
        if tokens.is_empty() {
            return Err(Error::EmptyQuery);
        }
        let handle = self.handle_for(tokens.len())?;
        let term = tokens
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
        handle.exact_count(&term)
    }

    /// Total number of tokens in the corpus: the sum of every
    /// `totalTokenCount` meta-document in the `1grams` index (the value is
    /// sharded across several documents by the builder).
    pub fn total_token_count(&self) -> Result<u64> {
        let handle = self.handle_for(1)?;
        let shards = handle.scan_meta(TOTAL_TOKEN_COUNT_FIELD, META_SCAN_CAP)?;
        shards
            .iter()
            .try_fold(0u64, |total, &shard| total.checked_add(shard))
            .ok_or_else(|| Error::Overflow {
                field: TOTAL_TOKEN_COUNT_FIELD.to_string(),
            })
    }

    /// The n-gram sizes this model has an index for, ascending.
    pub fn bound_sizes(&self) -> Vec<usize> {
        self.handles.keys().copied().collect()
    }

    /// Bound handles by size, ascending (diagnostic).
    pub fn handles(&self) -> impl Iterator<Item = (usize, &IndexHandle)> {
        self.handles.iter().map(|(size, h)| (*size, h.as_ref()))
    }

    pub fn top_dir(&self) -> &Path {
        &self.top_dir
    }

    fn handle_for(&self, size: usize) -> Result<&IndexHandle> {
        self.handles
            .get(&size)
            .map(Arc::as_ref)
            .ok_or_else(|| Error::UnboundSize {
                size,
                top_dir: self.top_dir.clone(),
            })
    }
}

impl fmt::Display for NGramModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, handle) in self.handles.values().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", handle.dir().display())?;
        }
        f.write_str("]")
    }
}
