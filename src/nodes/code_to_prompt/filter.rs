//! Path filtering for repository rendering.
//!
//! A repository-relative path is accepted or rejected with this precedence:
//! - Rule F1: matches a built-in ignore pattern or a user exclude pattern -> reject
//! - Rule F2: user include patterns given -> accept iff one matches (extension not consulted)
//! - Rule F3: otherwise accept iff the extension is supported
//!
//! Patterns are globs matched against the whole relative path with forward
//! slashes. `*` also crosses `/`, so `*.pyc` rejects `a/b/c.pyc`.

use crate::error::{NodeError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Paths never rendered, whatever the user asks for.
pub const IGNORE_PATTERNS: &[&str] = &[
    "node_modules/**",
    "venv/**",
    ".git/**",
    "**/*.min.js",
    "**/*.min.css",
    "**/dist/**",
    "**/build/**",
    "**/__pycache__/**",
    ".env*",
    "*.pyc",
    "*.pyo",
    "*.pyd",
];

/// Extensions rendered when no include patterns are given.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    // Web
    ".js", ".jsx", ".ts", ".tsx", ".html", ".css", ".scss", ".sass",
    // Backend
    ".py", ".java", ".go", ".rb", ".php", ".cs",
    // Configuration
    ".json", ".yml", ".yaml", ".toml", ".ini",
    // Documentation
    ".md", ".rst",
    // Shell
    ".sh", ".bash",
    // Other
    ".sql", ".graphql",
];

/// Outcome of filtering one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Path participates in the output.
    Accepted,
    /// Matched a built-in ignore pattern (Rule F1).
    Ignored { pattern: String },
    /// Matched a user exclude pattern (Rule F1).
    Excluded { pattern: String },
    /// Include patterns were given and none matched (Rule F2).
    NotIncluded,
    /// Extension outside the supported set (Rule F3).
    UnsupportedExtension,
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// Compiled ignore, exclude, and include globs.
#[derive(Debug, Clone)]
pub struct PatternSet {
    ignore: GlobSet,
    exclude: GlobSet,
    exclude_patterns: Vec<String>,
    include: Option<GlobSet>,
}

impl PatternSet {
    /// Compile user patterns alongside the built-in ignore list.
    ///
    /// An empty `include` list means "filter by extension".
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        let ignore_patterns: Vec<String> = IGNORE_PATTERNS.iter().map(|p| p.to_string()).collect();

        Ok(Self {
            ignore: build_globset(&ignore_patterns, "ignore_patterns")?,
            exclude: build_globset(exclude, "exclude_patterns")?,
            exclude_patterns: exclude.iter().map(|p| normalize_path(p)).collect(),
            include: if include.is_empty() {
                None
            } else {
                Some(build_globset(include, "include_patterns")?)
            },
        })
    }

    /// Compile newline-separated pattern lists as the host supplies them.
    pub fn from_lists(include: &str, exclude: &str) -> Result<Self> {
        Self::new(&parse_pattern_list(include), &parse_pattern_list(exclude))
    }

    /// Decide whether `rel_path` participates in the output.
    pub fn check(&self, rel_path: &str) -> Verdict {
        let path = normalize_path(rel_path);

        if let Some(idx) = self.ignore.matches(&path).first() {
            return Verdict::Ignored {
                pattern: IGNORE_PATTERNS[*idx].to_string(),
            };
        }
        if let Some(idx) = self.exclude.matches(&path).first() {
            return Verdict::Excluded {
                pattern: self.exclude_patterns[*idx].clone(),
            };
        }

        if let Some(include) = &self.include {
            return if include.is_match(&path) {
                Verdict::Accepted
            } else {
                Verdict::NotIncluded
            };
        }

        if SUPPORTED_EXTENSIONS.contains(&extension_of(&path)) {
            Verdict::Accepted
        } else {
            Verdict::UnsupportedExtension
        }
    }
}

/// Split a newline-separated pattern list, dropping blank lines and
/// surrounding whitespace.
pub fn parse_pattern_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Extension of the final path component, including the dot.
///
/// Dotfiles without a further dot (`.bashrc`) and names ending in a dot have
/// no extension.
pub fn extension_of(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    if name.ends_with('.') {
        return "";
    }
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[idx..],
        _ => "",
    }
}

fn build_globset(patterns: &[String], field_name: &str) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
        let glob = Glob::new(&normalize_path(pattern)).map_err(|e| {
            NodeError::UserError(format!(
                "invalid glob pattern in {}: '{}' - {}",
                field_name, pattern, e
            ))
        })?;
        builder.add(glob);
    }

    builder
        .build()
        .map_err(|e| NodeError::UserError(format!("failed to compile {} globs: {}", field_name, e)))
}

fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}
