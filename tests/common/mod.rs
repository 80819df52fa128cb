//! Shared fixture helpers: build small on-disk n-gram index trees.
//!
//! Fixtures live under the system temp dir, one directory per test, so
//! parallel tests never collide.

use ngq::index::{COUNT_FIELD, NGRAM_FIELD, TOTAL_TOKEN_COUNT_FIELD};
use std::fs;
use std::path::{Path, PathBuf};
use tantivy::schema::{Schema, STORED, STRING};
use tantivy::{doc, Index, IndexWriter, TantivyDocument};

/// Create a fresh scratch directory for one test.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join("ngq_test_fixtures")
        .join(format!("{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("failed to create fixture dir");
    dir
}

fn frequency_schema(with_meta: bool) -> Schema {
    let mut builder = Schema::builder();
    // STRING keeps the whole term as one raw token, which is what exact
    // lookups expect
    builder.add_text_field(NGRAM_FIELD, STRING | STORED);
    builder.add_text_field(COUNT_FIELD, STORED);
    if with_meta {
        builder.add_text_field(TOTAL_TOKEN_COUNT_FIELD, STRING | STORED);
    }
    builder.build()
}

/// Write one per-size index: `rows` of (ngram, count) plus, when given,
/// `totalTokenCount` meta shards (schema carries the meta field whenever
/// `meta` is `Some`, even with zero shards).
pub fn write_index(dir: &Path, rows: &[(&str, u64)], meta: Option<&[u64]>) {
    fs::create_dir_all(dir).expect("failed to create index dir");
    let schema = frequency_schema(meta.is_some());
    let index = Index::create_in_dir(dir, schema.clone()).expect("create index");
    let mut writer: IndexWriter = index.writer(15_000_000).expect("create writer");

    let ngram = schema.get_field(NGRAM_FIELD).unwrap();
    let count = schema.get_field(COUNT_FIELD).unwrap();
    for (term, n) in rows {
        writer
            .add_document(doc!(ngram => *term, count => n.to_string()))
            .expect("add frequency doc");
    }

    if let Some(shards) = meta {
        let total = schema.get_field(TOTAL_TOKEN_COUNT_FIELD).unwrap();
        for shard in shards {
            writer
                .add_document(doc!(total => shard.to_string()))
                .expect("add meta doc");
        }
    }

    writer.commit().expect("commit");
}

/// Write an index with raw stored values, for malformed-index cases:
/// each row's `count` string is stored verbatim, or the field is omitted
/// entirely when `None`.
pub fn write_raw_index(dir: &Path, rows: &[(&str, Option<&str>)]) {
    fs::create_dir_all(dir).expect("failed to create index dir");
    let schema = frequency_schema(false);
    let index = Index::create_in_dir(dir, schema.clone()).expect("create index");
    let mut writer: IndexWriter = index.writer(15_000_000).expect("create writer");

    let ngram = schema.get_field(NGRAM_FIELD).unwrap();
    let count = schema.get_field(COUNT_FIELD).unwrap();
    for (term, raw) in rows {
        let mut doc = TantivyDocument::default();
        doc.add_text(ngram, *term);
        if let Some(raw) = raw {
            doc.add_text(count, *raw);
        }
        writer.add_document(doc).expect("add raw doc");
    }

    writer.commit().expect("commit");
}

/// Standard fixture tree: 1/2/3-gram indexes over a tiny known corpus,
/// total token count sharded as 100 + 250.
pub fn build_corpus(name: &str) -> PathBuf {
    let top = scratch_dir(name);
    write_index(
        &top.join("1grams"),
        &[("good", 80), ("morning", 60), ("the", 200)],
        Some(&[100, 250]),
    );
    write_index(
        &top.join("2grams"),
        &[("good morning", 42), ("the good", 7)],
        None,
    );
    write_index(
        &top.join("3grams"),
        &[("the good morning", 3)],
        None,
    );
    top
}
