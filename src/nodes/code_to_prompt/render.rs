//! Report formats for collected files.

use super::collect::FileRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of characters kept in `summary` previews.
pub const PREVIEW_CHARS: usize = 200;

/// Shape of the rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Path, size, line count, and full content per file.
    #[default]
    Detailed,
    /// Metadata and a truncated preview per file.
    Summary,
    /// Directory set and per-extension counts; no content.
    Architecture,
}

impl OutputFormat {
    /// All formats, in the order the host offers them.
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::Detailed,
        OutputFormat::Summary,
        OutputFormat::Architecture,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Detailed => "detailed",
            OutputFormat::Summary => "summary",
            OutputFormat::Architecture => "architecture",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render `files` in `format`.
pub fn render(format: OutputFormat, files: &[FileRecord]) -> String {
    match format {
        OutputFormat::Detailed => render_detailed(files),
        OutputFormat::Summary => render_summary(files),
        OutputFormat::Architecture => render_architecture(files),
    }
}

/// Prepend a context-notes block when `notes` is non-empty.
pub fn with_context_notes(notes: &str, report: String) -> String {
    if notes.is_empty() {
        report
    } else {
        format!("# Context Notes\n{}\n\n{}", notes, report)
    }
}

fn render_detailed(files: &[FileRecord]) -> String {
    let mut lines = vec!["# Repository Code Analysis\n".to_string()];

    for file in files {
        lines.push(format!("\n## File: {}", file.path));
        lines.push(format!(
            "Size: {:.2}KB | Lines: {}\n",
            file.size_kb, file.lines
        ));
        lines.push(format!("```{}", file.fence_tag()));
        lines.push(file.content.clone());
        lines.push("```\n".to_string());
    }

    lines.join("\n")
}

fn render_summary(files: &[FileRecord]) -> String {
    let mut lines = vec!["# Repository Summary\n".to_string()];

    for file in files {
        lines.push(format!("\n## {}", file.path));
        lines.push(format!("- Size: {:.2}KB", file.size_kb));
        lines.push(format!("- Lines: {}", file.lines));
        lines.push("- Preview:".to_string());
        lines.push(format!("```{}", file.fence_tag()));
        lines.push(preview(&file.content));
        lines.push("```\n".to_string());
    }

    lines.join("\n")
}

fn render_architecture(files: &[FileRecord]) -> String {
    // Extensions keep first-seen order; directories are sorted.
    let mut extension_counts: Vec<(&str, usize)> = Vec::new();
    let mut directories = std::collections::BTreeSet::new();

    for file in files {
        match extension_counts
            .iter_mut()
            .find(|(ext, _)| *ext == file.extension)
        {
            Some((_, count)) => *count += 1,
            None => extension_counts.push((file.extension.as_str(), 1)),
        }
        directories.insert(parent_dir(&file.path));
    }

    let mut lines = vec![
        "# Repository Architecture Summary\n".to_string(),
        "## Directory Structure\n```".to_string(),
    ];
    lines.extend(directories.into_iter().map(String::from));
    lines.push("```\n".to_string());

    lines.push("## File Distribution\n".to_string());
    for (ext, count) in extension_counts {
        lines.push(format!("- {}: {} files", ext, count));
    }

    lines.join("\n")
}

/// First [`PREVIEW_CHARS`] characters of `content`, with `...` when cut.
fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

/// Containing directory of a relative path; `.` for the root.
fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => ".",
    }
}
