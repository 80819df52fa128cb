//! One open connection to a physical frequency index.
//!
//! An [`IndexHandle`] wraps a tantivy index directory produced by the
//! external frequency-index builder and answers exact-term lookups against
//! its `ngram` field. Handles are shared between models through
//! [`Arc`](std::sync::Arc), so the underlying reader is released when the
//! last holder goes away; there is no destructive close.

use crate::error::{Error, Result};
use crate::index::{COUNT_FIELD, NGRAM_FIELD};
use std::path::{Path, PathBuf};
use tantivy::collector::TopDocs;
use tantivy::query::{RegexQuery, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Value};
use tantivy::{Index, IndexReader, ReloadPolicy, TantivyDocument, Term};

/// An open, reusable connection to one on-disk n-gram index.
pub struct IndexHandle {
    dir: PathBuf,
    index: Index,
    reader: IndexReader,
    ngram_field: Field,
    count_field: Field,
}

impl IndexHandle {
    /// Open the index at `dir`.
    ///
    /// Fails if the directory is unreadable, is not a tantivy index, or its
    /// schema lacks the `ngram`/`count` fields the builder is contracted to
    /// write.
    pub fn open(dir: &Path) -> Result<Self> {
        let open_err = |source| Error::IndexOpen {
            dir: dir.to_path_buf(),
            source,
        };

        let index = Index::open_in_dir(dir).map_err(open_err)?;
        // Indexes are immutable once built; nothing ever needs a reload.
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(open_err)?;

        let schema = index.schema();
        let ngram_field = schema.get_field(NGRAM_FIELD).map_err(open_err)?;
        let count_field = schema.get_field(COUNT_FIELD).map_err(open_err)?;

        Ok(Self {
            dir: dir.to_path_buf(),
            index,
            reader,
            ngram_field,
            count_field,
        })
    }

    /// Directory this handle was opened from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of documents in the index (diagnostic).
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// Exact-match lookup: the stored `count` of the document whose `ngram`
    /// field equals `term`, or 0 if no document matches.
    ///
    /// The builder guarantees at most one document per term; if the index
    /// violates that, the first match wins.
    pub fn exact_count(&self, term: &str) -> Result<u64> {
        let searcher = self.reader.searcher();
        let query = TermQuery::new(
            Term::from_field_text(self.ngram_field, term),
            IndexRecordOption::Basic,
        );
        let top = searcher.search(&query, &TopDocs::with_limit(1))?;

        match top.first() {
            None => Ok(0),
            Some((_score, addr)) => {
                let doc: TantivyDocument = searcher.doc(*addr)?;
                let raw = doc
                    .get_first(self.count_field)
                    .and_then(|v| v.as_str())
                    .ok_or_else(|| Error::MissingField {
                        dir: self.dir.clone(),
                        field: COUNT_FIELD.to_string(),
                    })?;
                self.parse_count(raw)
            }
        }
    }

    /// Scan meta-documents: collect the stored value of `field` from every
    /// document carrying it, up to `cap` documents.
    ///
    /// The cap protects against unbounded memory use on a malformed index;
    /// exceeding it or matching nothing is fatal. A field absent from the
    /// schema is indistinguishable from zero matches.
    pub fn scan_meta(&self, field: &str, cap: usize) -> Result<Vec<u64>> {
        let no_results = || Error::NoResults {
            field: field.to_string(),
        };

        let meta_field = self
            .index
            .schema()
            .get_field(field)
            .map_err(|_| no_results())?;

        let searcher = self.reader.searcher();
        let query = RegexQuery::from_pattern(".+", meta_field)?;
        // One past the cap so an overflow is detectable without collecting
        // the whole result set.
        let top = searcher.search(&query, &TopDocs::with_limit(cap + 1))?;

        if top.is_empty() {
            return Err(no_results());
        }
        if top.len() > cap {
            return Err(Error::TooManyResults {
                field: field.to_string(),
                cap,
            });
        }

        let mut values = Vec::with_capacity(top.len());
        for (_score, addr) in top {
            let doc: TantivyDocument = searcher.doc(addr)?;
            let raw = doc
                .get_first(meta_field)
                .and_then(|v| v.as_str())
                .ok_or_else(|| Error::MissingField {
                    dir: self.dir.clone(),
                    field: field.to_string(),
                })?;
            values.push(self.parse_count(raw)?);
        }
        Ok(values)
    }

    fn parse_count(&self, raw: &str) -> Result<u64> {
        raw.parse().map_err(|source| Error::BadCount {
            dir: self.dir.clone(),
            value: raw.to_string(),
            source,
        })
    }
}

impl std::fmt::Debug for IndexHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexHandle")
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}
