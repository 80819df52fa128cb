//! # NGQ - N-gram Frequency Lookup
//!
//! NGQ is a read-only lookup layer over precomputed n-gram frequency
//! indexes: given an ordered sequence of 1-4 tokens it returns how often
//! that exact sequence occurred in a reference corpus, and it can report
//! the corpus's total token count. It serves statistical language-model
//! consumers (spelling and grammar scoring) that need fast, repeated
//! frequency lookups without touching the corpus itself.
//!
//! ## Architecture
//!
//! The crate is organized into these modules:
//!
//! - [`model`] - The public query surface ([`NGramModel`])
//! - [`index`] - Open index handles and the process-wide handle registry
//! - [`error`] - The failure taxonomy (everything here is fail-fast)
//!
//! ## Quick Start
//!
//! ```no_run
//! use ngq::NGramModel;
//! use std::path::Path;
//!
//! # fn main() -> ngq::Result<()> {
//! // Top directory with 1grams/, 2grams/, 3grams/ (and optionally 4grams/)
//! let model = NGramModel::open(Path::new("/data/ngrams/en"))?;
//!
//! assert!(model.count(&["good", "morning"])? > 0);
//! println!("corpus size: {} tokens", model.total_token_count()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Index layout
//!
//! Indexes are produced by an external builder, one tantivy index per
//! n-gram size. Frequency documents carry the stored fields `ngram` (the
//! space-joined term) and `count` (decimal string); the `1grams` index
//! additionally carries `totalTokenCount` meta-documents whose values sum
//! to the corpus size. This crate never writes.
//!
//! Handles are deduplicated process-wide: any number of models over the
//! same physical index share one open reader, and a model going away can
//! never invalidate another (shared ownership is reference-counted).

pub mod error;
pub mod index;
pub mod model;

pub use error::{Error, Result};
pub use index::{global_registry, HandleRegistry, IndexHandle};
pub use model::NGramModel;
