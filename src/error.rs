//! Error types for the lookup layer.
//!
//! Every failure here means either a misconfigured/corrupted index or a
//! caller contract violation. Nothing is recoverable internally, so the
//! policy is fail-fast with a descriptive message rather than a silent
//! fallback.

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Top directory missing or not a directory.
    #[error("not found or not a directory: {}", .0.display())]
    InvalidLayout(PathBuf),

    /// Fewer than the required '1grams', '2grams', '3grams' subdirectories.
    #[error(
        "expected at least '1grams', '2grams' and '3grams' sub directories but only got {found:?} in {}",
        .dir.display()
    )]
    MissingSubdirs { dir: PathBuf, found: Vec<String> },

    /// Internal invariant: one binding per n-gram size.
    #[error("index for {0}-grams already bound")]
    DuplicateBinding(usize),

    /// No ngram subdirectories were bound at all.
    #[error("no '1grams' ... '4grams' directories found in {}", .0.display())]
    NoIndexesFound(PathBuf),

    /// A query was issued for a token count with no bound index.
    #[error("no {size}grams index found in {}", .top_dir.display())]
    UnboundSize { size: usize, top_dir: PathBuf },

    /// `count` was called with an empty token sequence.
    #[error("cannot look up an empty token sequence")]
    EmptyQuery,

    /// The index at the given location could not be opened.
    #[error("failed to open index at {}: {source}", .dir.display())]
    IndexOpen {
        dir: PathBuf,
        #[source]
        source: tantivy::TantivyError,
    },

    /// A meta-document scan matched more documents than the safety cap.
    #[error("did not expect more than {cap} '{field}' meta documents")]
    TooManyResults { field: String, cap: usize },

    /// A meta-document scan matched nothing.
    #[error("expected '{field}' meta documents not found in 1grams index")]
    NoResults { field: String },

    /// A matched document is missing a stored field it must carry.
    #[error("document in {} has no stored '{field}' field", .dir.display())]
    MissingField { dir: PathBuf, field: String },

    /// Summed meta-document values exceed the representable range.
    #[error("'{field}' shard values overflow a 64-bit total")]
    Overflow { field: String },

    /// A stored count value failed to parse as a non-negative integer.
    #[error("malformed count value {value:?} in {}: {source}", .dir.display())]
    BadCount {
        dir: PathBuf,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// Failure inside the underlying search engine.
    #[error("index query failed: {0}")]
    Search(#[from] tantivy::TantivyError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
