//! Repository traversal and per-file analysis.

use super::filter::{PatternSet, Verdict, extension_of};
use crate::error::{NodeError, Result};
use ignore::WalkBuilder;
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

/// A file accepted for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    /// Path relative to the repository root, forward slashes.
    pub path: String,
    /// Size in kilobytes (bytes / 1024).
    pub size_kb: f64,
    /// Number of lines in `content`.
    pub lines: usize,
    /// Full UTF-8 content.
    pub content: String,
    /// Extension including the dot, empty when there is none.
    pub extension: String,
}

impl FileRecord {
    /// Language tag for fenced blocks (the extension without its dot).
    pub fn fence_tag(&self) -> &str {
        self.extension.strip_prefix('.').unwrap_or(&self.extension)
    }
}

/// Why an accepted path did not make it into the output.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Larger than the configured cap.
    Oversized { size_kb: f64, limit_kb: u64 },
    /// Content is not valid UTF-8.
    NotText,
    /// The file could not be read.
    Unreadable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Oversized { size_kb, limit_kb } => {
                write!(f, "{:.2}KB exceeds the {}KB limit", size_kb, limit_kb)
            }
            SkipReason::NotText => write!(f, "not valid UTF-8 text"),
            SkipReason::Unreadable(e) => write!(f, "unreadable: {}", e),
        }
    }
}

/// An accepted path that was dropped during analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFile {
    pub path: String,
    pub reason: SkipReason,
}

/// Caps applied while collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_files: usize,
    pub max_file_size_kb: u64,
}

/// Result of walking a repository.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub records: Vec<FileRecord>,
    pub skipped: Vec<SkippedFile>,
}

/// Walk `root` and collect the files that pass `patterns` and `limits`.
///
/// Entries are visited in file-name order so the result is deterministic.
/// The repository's own `.git` directory is never descended into, and
/// symbolic links are neither followed nor rendered. Walking
/// stops once `limits.max_files` records have been collected; files skipped
/// during analysis do not count toward that cap.
pub fn collect_files(root: &Path, patterns: &PatternSet, limits: Limits) -> Result<Collection> {
    if !root.is_dir() {
        return Err(NodeError::UserError(format!(
            "repository root '{}' is not a directory",
            root.display()
        )));
    }

    let mut collection = Collection::default();
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| !(entry.depth() == 1 && entry.file_name() == ".git"))
        .build();

    for entry in walker {
        if collection.records.len() >= limits.max_files {
            debug!(max_files = limits.max_files, "file limit reached, stopping walk");
            break;
        }

        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        let Some(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_symlink() {
            debug!(path = %entry.path().display(), "skipping symlink");
            continue;
        }
        if !file_type.is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let rel_path = relative.to_string_lossy().replace('\\', "/");

        let verdict = patterns.check(&rel_path);
        if !verdict.is_accepted() {
            log_rejection(&rel_path, &verdict);
            continue;
        }

        match analyze_file(entry.path(), &rel_path, limits.max_file_size_kb) {
            Ok(record) => collection.records.push(record),
            Err(reason) => {
                warn!(path = %rel_path, reason = %reason, "skipping file");
                collection.skipped.push(SkippedFile {
                    path: rel_path,
                    reason,
                });
            }
        }
    }

    debug!(
        collected = collection.records.len(),
        skipped = collection.skipped.len(),
        "repository walk finished"
    );
    Ok(collection)
}

/// Measure and read one file.
pub fn analyze_file(
    path: &Path,
    rel_path: &str,
    max_size_kb: u64,
) -> std::result::Result<FileRecord, SkipReason> {
    let bytes_len = std::fs::metadata(path)
        .map_err(|e| SkipReason::Unreadable(e.to_string()))?
        .len();
    let size_kb = bytes_len as f64 / 1024.0;
    if size_kb > max_size_kb as f64 {
        return Err(SkipReason::Oversized {
            size_kb,
            limit_kb: max_size_kb,
        });
    }

    let bytes = std::fs::read(path).map_err(|e| SkipReason::Unreadable(e.to_string()))?;
    let content = String::from_utf8(bytes).map_err(|_| SkipReason::NotText)?;

    Ok(FileRecord {
        path: rel_path.to_string(),
        size_kb,
        lines: count_lines(&content),
        extension: extension_of(rel_path).to_string(),
        content,
    })
}

/// Count lines, treating `\n`, `\r\n` and a bare `\r` as terminators.
///
/// A trailing terminator does not start an extra line.
pub fn count_lines(content: &str) -> usize {
    let bytes = content.as_bytes();
    let mut lines = 0;
    let mut line_open = false;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                lines += 1;
                line_open = false;
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
            }
            b'\n' => {
                lines += 1;
                line_open = false;
            }
            _ => line_open = true,
        }
        i += 1;
    }
    lines + usize::from(line_open)
}

fn log_rejection(rel_path: &str, verdict: &Verdict) {
    match verdict {
        Verdict::Ignored { pattern } | Verdict::Excluded { pattern } => {
            debug!(path = %rel_path, pattern = %pattern, "path filtered out");
        }
        other => debug!(path = %rel_path, verdict = ?other, "path filtered out"),
    }
}
