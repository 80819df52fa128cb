//! Index access: open handles and the process-wide handle registry.

pub mod handle;
pub mod registry;

pub use handle::IndexHandle;
pub use registry::{global_registry, HandleRegistry};

/// Stored field holding the space-joined n-gram term.
pub const NGRAM_FIELD: &str = "ngram";
/// Stored field holding the term's occurrence count as a decimal string.
pub const COUNT_FIELD: &str = "count";
/// Meta-document field holding one shard of the corpus total token count.
/// Present only in the 1grams index.
pub const TOTAL_TOKEN_COUNT_FIELD: &str = "totalTokenCount";
