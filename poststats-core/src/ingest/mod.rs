//! Post ingestion
//!
//! Reads exported feed files and hydrates them into [`SocialPost`]s.
//!
//! ## Supported layouts
//!
//! - JSON array of records: `[{...}, {...}]`
//! - Feed envelope: `{"data": {"posts": [...]}}` or `{"posts": [...]}`
//! - JSON lines: one record per line
//!
//! Individual malformed records are logged and skipped; only unreadable
//! files are errors.

pub mod hydrator;

pub use hydrator::{hydrate, hydrate_value, parse_created_time, RawPost};

use crate::error::{Error, Result};
use crate::types::SocialPost;
use std::path::{Path, PathBuf};

/// Outcome of reading one or more feed files.
#[derive(Debug, Default)]
pub struct IngestResult {
    /// Successfully hydrated posts, in file order
    pub posts: Vec<SocialPost>,
    /// Files read
    pub files_read: usize,
    /// Records skipped because they could not be hydrated
    pub records_skipped: usize,
    /// Human-readable reasons for skipped records
    pub warnings: Vec<String>,
}

impl IngestResult {
    fn merge(&mut self, other: IngestResult) {
        self.posts.extend(other.posts);
        self.files_read += other.files_read;
        self.records_skipped += other.records_skipped;
        self.warnings.extend(other.warnings);
    }

    fn record(&mut self, result: Result<SocialPost>) {
        match result {
            Ok(post) => self.posts.push(post),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed post record");
                self.records_skipped += 1;
                self.warnings.push(e.to_string());
            }
        }
    }
}

/// Expand glob patterns into a sorted, de-duplicated list of files.
///
/// Patterns without glob metacharacters are returned as-is so a missing
/// file surfaces as an IO error when read.
pub fn discover(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        if !pattern.contains(['*', '?', '[']) {
            files.push(PathBuf::from(pattern));
            continue;
        }

        let mut matched = 0;
        for entry in glob::glob(pattern)? {
            match entry {
                Ok(path) if path.is_file() => {
                    files.push(path);
                    matched += 1;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(pattern = %pattern, error = %e, "Unreadable glob entry");
                }
            }
        }
        tracing::debug!(pattern = %pattern, count = matched, "Expanded input pattern");
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Parse feed content already loaded into memory.
pub fn parse_posts(content: &str, source_name: &str) -> IngestResult {
    let mut result = IngestResult::default();

    match serde_json::from_str::<serde_json::Value>(content) {
        Ok(serde_json::Value::Array(records)) => {
            for (i, record) in records.into_iter().enumerate() {
                result.record(hydrate_value(record, &format!("{source_name}[{i}]")));
            }
        }
        Ok(value @ serde_json::Value::Object(_)) => match envelope_posts(&value) {
            Some(records) => {
                for (i, record) in records.iter().enumerate() {
                    result.record(hydrate_value(record.clone(), &format!("{source_name}[{i}]")));
                }
            }
            None => result.record(hydrate_value(value, source_name)),
        },
        Ok(other) => result.record(Err(Error::Parse {
            source_name: source_name.to_string(),
            message: format!("unexpected top-level JSON value: {other}"),
        })),
        Err(_) => {
            for (i, line) in content.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                let line_source = format!("{source_name}:{}", i + 1);
                let parsed = serde_json::from_str::<serde_json::Value>(line)
                    .map_err(|e| Error::Parse {
                        source_name: line_source.clone(),
                        message: e.to_string(),
                    })
                    .and_then(|value| hydrate_value(value, &line_source));
                result.record(parsed);
            }
        }
    }

    result
}

fn envelope_posts(value: &serde_json::Value) -> Option<&Vec<serde_json::Value>> {
    value
        .pointer("/data/posts")
        .or_else(|| value.get("posts"))
        .and_then(|posts| posts.as_array())
}

/// Read and hydrate every post in one feed file.
pub fn read_posts(path: &Path) -> Result<IngestResult> {
    let content = std::fs::read_to_string(path)?;
    let mut result = parse_posts(&content, &path.display().to_string());
    result.files_read = 1;

    tracing::info!(
        path = %path.display(),
        posts = result.posts.len(),
        skipped = result.records_skipped,
        "Read feed file"
    );

    Ok(result)
}

/// Read every file in `paths`, concatenating posts in path order.
pub fn read_all(paths: &[PathBuf]) -> Result<IngestResult> {
    let mut result = IngestResult::default();
    for path in paths {
        result.merge(read_posts(path)?);
    }
    Ok(result)
}
