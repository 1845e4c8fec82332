use super::*;
use crate::test_support::{create_repo_with_files, dir_entries};
use tempfile::TempDir;

/// Renderer with clones confined to a scratch root the test can inspect.
fn renderer() -> (CodeToPrompt, TempDir) {
    let clone_root = TempDir::new().unwrap();
    let node = CodeToPrompt::new(Some(clone_root.path().to_path_buf()));
    (node, clone_root)
}

fn input_for(source: &TempDir) -> RendererInput {
    RendererInput::for_repository(source.path().to_string_lossy())
}

fn python_lines(n: usize) -> String {
    (0..n).map(|i| format!("x{} = {}\n", i, i)).collect()
}

// =========================================================================
// Filtering through a real clone
// =========================================================================

#[test]
fn test_default_settings_render_supported_files_only() {
    let source = create_repo_with_files(&[
        ("a.py", python_lines(50)),
        ("b.md", "# Notes\n".repeat(10)),
        ("node_modules/x.js", "module.exports = 'hidden';\n".to_string()),
    ]);
    let (node, _root) = renderer();

    let out = node.execute(&input_for(&source));

    assert!(out.starts_with("# Repository Code Analysis\n"), "{}", out);
    assert!(out.contains("## File: a.py\nSize: "));
    assert!(out.contains("| Lines: 50\n"));
    assert!(out.contains("```py\nx0 = 0\n"));
    assert!(out.contains("## File: b.md"));
    assert!(out.contains("| Lines: 10\n"));
    assert!(out.contains("```md\n# Notes\n"));
    assert!(!out.contains("node_modules"));
    assert!(!out.contains("hidden"));
}

#[test]
fn test_include_patterns_override_extensions() {
    let source = create_repo_with_files(&[
        ("src/lib.rs", "pub fn f() {}\n"),
        ("src/app.py", "print('py')\n"),
        ("Makefile", "all:\n"),
    ]);
    let (node, _root) = renderer();

    let input = RendererInput {
        include_patterns: "\n  src/*.rs  \nMakefile\n".to_string(),
        ..input_for(&source)
    };
    let out = node.execute(&input);

    assert!(out.contains("## File: src/lib.rs"));
    assert!(out.contains("## File: Makefile"));
    assert!(!out.contains("src/app.py"));
}

#[test]
fn test_exclude_patterns_remove_matches() {
    let source = create_repo_with_files(&[
        ("src/app.ts", "export const app = 1;\n"),
        ("src/generated/api.ts", "export const generated = 1;\n"),
    ]);
    let (node, _root) = renderer();

    let input = RendererInput {
        exclude_patterns: "src/generated/**".to_string(),
        ..input_for(&source)
    };
    let out = node.execute(&input);

    assert!(out.contains("## File: src/app.ts"));
    assert!(!out.contains("generated"));
}

#[test]
fn test_oversized_file_content_is_absent() {
    let big = format!("BIG_MARKER\n{}", "y".repeat(2 * 1024));
    let source = create_repo_with_files(&[("big.py", big), ("small.py", "ok = True\n".to_string())]);
    let (node, _root) = renderer();

    let input = RendererInput {
        max_file_size_kb: 1,
        ..input_for(&source)
    };
    let out = node.execute(&input);

    assert!(out.contains("## File: small.py"));
    assert!(!out.contains("BIG_MARKER"));
    assert!(!out.contains("big.py"));
}

#[test]
fn test_max_files_caps_rendered_files() {
    let files: Vec<(String, String)> = (0..8)
        .map(|i| (format!("m{}.py", i), format!("v = {}\n", i)))
        .collect();
    let borrowed: Vec<(&str, &str)> = files
        .iter()
        .map(|(p, c)| (p.as_str(), c.as_str()))
        .collect();
    let source = create_repo_with_files(&borrowed);
    let (node, _root) = renderer();

    let input = RendererInput {
        max_files: 3,
        ..input_for(&source)
    };
    let out = node.execute(&input);

    assert_eq!(out.matches("## File: ").count(), 3);
}

// =========================================================================
// Output formats
// =========================================================================

#[test]
fn test_summary_format_truncates_previews() {
    let source = create_repo_with_files(&[("long.js", "z".repeat(300))]);
    let (node, _root) = renderer();

    let input = RendererInput {
        output_format: OutputFormat::Summary,
        ..input_for(&source)
    };
    let out = node.execute(&input);

    assert!(out.starts_with("# Repository Summary\n"));
    assert!(out.contains(&format!("```js\n{}...\n```", "z".repeat(200))));
    assert!(!out.contains(&"z".repeat(201)));
}

#[test]
fn test_architecture_format_has_no_content() {
    let source = create_repo_with_files(&[
        ("main.py", "SECRET = 'a'\n"),
        ("pkg/util.py", "SECRET = 'b'\n"),
        ("docs/guide.md", "SECRET guide\n"),
    ]);
    let (node, _root) = renderer();

    let input = RendererInput {
        output_format: OutputFormat::Architecture,
        ..input_for(&source)
    };
    let out = node.execute(&input);

    assert!(out.starts_with("# Repository Architecture Summary\n"));
    assert!(!out.contains("SECRET"));
    assert!(out.contains("```\n.\ndocs\npkg\n```"));
    // Walk order is by file name: docs/ before main.py before pkg/.
    assert!(out.contains("- .md: 1 files\n- .py: 2 files"));
}

#[test]
fn test_context_notes_are_prepended() {
    let source = create_repo_with_files(&[("a.py", "a = 1\n")]);
    let (node, _root) = renderer();

    let input = RendererInput {
        context_notes: "Review the auth flow".to_string(),
        ..input_for(&source)
    };
    let out = node.execute(&input);

    assert!(out.starts_with("# Context Notes\nReview the auth flow\n\n# Repository Code Analysis\n"));
}

// =========================================================================
// Errors become report text
// =========================================================================

#[test]
fn test_out_of_range_inputs_are_reported() {
    let (node, root) = renderer();

    let input = RendererInput {
        max_files: 0,
        ..RendererInput::for_repository("https://example.invalid/r.git")
    };
    let out = node.execute(&input);
    assert_eq!(
        out,
        "Error processing repository: max_files must be between 1 and 1000, got 0"
    );

    let input = RendererInput {
        max_file_size_kb: 5001,
        ..RendererInput::for_repository("https://example.invalid/r.git")
    };
    let out = node.execute(&input);
    assert!(out.contains("max_file_size_kb must be between 1 and 5000"));

    assert!(dir_entries(root.path()).is_empty());
}

#[test]
fn test_empty_url_is_reported() {
    let (node, _root) = renderer();
    let out = node.execute(&RendererInput::default());
    assert_eq!(out, "Error processing repository: repository_url must not be empty");
}

#[test]
fn test_invalid_glob_is_reported() {
    let source = create_repo_with_files(&[("a.py", "a = 1\n")]);
    let (node, _root) = renderer();

    let input = RendererInput {
        exclude_patterns: "src/[".to_string(),
        ..input_for(&source)
    };
    let out = node.execute(&input);

    assert!(out.starts_with(ERROR_PREFIX));
    assert!(out.contains("exclude_patterns"));
}

#[test]
fn test_clone_failure_is_reported() {
    let source = create_repo_with_files(&[("a.py", "a = 1\n")]);
    let (node, _root) = renderer();

    let input = RendererInput {
        branch: "missing-branch".to_string(),
        ..input_for(&source)
    };
    let out = node.execute(&input);

    assert!(out.starts_with("Error processing repository: Git operation failed"));
}

// =========================================================================
// Ephemeral clone lifetime
// =========================================================================

#[test]
fn test_clone_removed_after_success() {
    let source = create_repo_with_files(&[("a.py", "a = 1\n")]);
    let (node, root) = renderer();

    let out = node.execute(&input_for(&source));

    assert!(out.contains("## File: a.py"));
    assert!(dir_entries(root.path()).is_empty());
}

#[test]
fn test_clone_removed_after_failure() {
    let source = create_repo_with_files(&[("a.py", "a = 1\n")]);
    let (node, root) = renderer();

    let input = RendererInput {
        branch: "missing-branch".to_string(),
        ..input_for(&source)
    };
    node.execute(&input);

    assert!(dir_entries(root.path()).is_empty());
}

#[test]
fn test_repeated_runs_do_not_collide() {
    let source = create_repo_with_files(&[("a.py", "a = 1\n")]);
    let (node, root) = renderer();

    let first = node.execute(&input_for(&source));
    let second = node.execute(&input_for(&source));

    assert_eq!(first, second);
    assert!(dir_entries(root.path()).is_empty());
}

// =========================================================================
// Node interface
// =========================================================================

#[test]
fn test_node_identity() {
    let node = CodeToPrompt::default();
    assert_eq!(node.id(), "Code2Prompt");
    assert_eq!(node.display_name(), "Code to Prompt Converter");
}

#[test]
fn test_schema_matches_defaults() {
    let schema = CodeToPrompt::default().schema();

    let max_files = schema.field("max_files").unwrap();
    assert_eq!(max_files.default, Value::from(100));
    assert_eq!(max_files.kind, crate::nodes::FieldKind::Int { min: 1, max: 1000 });

    let format = schema.field("output_format").unwrap();
    assert_eq!(format.default, Value::from("detailed"));

    assert!(!schema.field("branch").unwrap().required);
    assert!(schema.field("repository_url").unwrap().required);
}

#[test]
fn test_run_with_inputs_map() {
    let source = create_repo_with_files(&[("a.py", "a = 1\n"), ("b.md", "# B\n")]);
    let (node, root) = renderer();

    let mut inputs = Inputs::new();
    inputs.insert(
        "repository_url".to_string(),
        Value::from(source.path().to_string_lossy().into_owned()),
    );
    inputs.insert("output_format".to_string(), Value::from("architecture"));

    let out = node.run(&inputs).unwrap();

    assert!(out.contains("- .py: 1 files"));
    assert!(out.contains("- .md: 1 files"));
    assert!(dir_entries(root.path()).is_empty());
}

#[test]
fn test_run_never_errors_on_bad_inputs() {
    let (node, _root) = renderer();

    let mut inputs = Inputs::new();
    inputs.insert("repository_url".to_string(), Value::from("x"));
    inputs.insert("output_format".to_string(), Value::from("verbose"));
    let out = node.run(&inputs).unwrap();
    assert!(out.starts_with("Error processing repository: invalid renderer inputs"));

    let mut inputs = Inputs::new();
    inputs.insert("colour".to_string(), Value::from("red"));
    let out = node.run(&inputs).unwrap();
    assert!(out.contains("unknown input 'colour'"));
}
