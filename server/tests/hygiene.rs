//! Hygiene: enforces coding standards at test time
//!
//! Scans the production sources of the server crate for patterns that can
//! crash a request handler or swallow an error. Each pattern has a budget;
//! the budget only ever goes down.

use std::fs;
use std::path::{Path, PathBuf};

/// Optional env lookups in `config.rs` and best-effort error-body parsing
/// in `services/auth.rs`.
const MAX_DOT_OK: usize = 3;

/// Production `.rs` files under `src/`, skipping `*_test.rs` siblings.
fn production_sources() -> Vec<(PathBuf, String)> {
    let mut out = Vec::new();
    let mut pending = vec![PathBuf::from("src")];
    while let Some(dir) = pending.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for path in entries.flatten().map(|e| e.path()) {
            if path.is_dir() {
                pending.push(path);
            } else if is_production_rs(&path) {
                if let Ok(content) = fs::read_to_string(&path) {
                    out.push((path, content));
                }
            }
        }
    }
    out
}

fn is_production_rs(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "rs") && !path.to_string_lossy().ends_with("_test.rs")
}

fn assert_budget(pattern: &str, max: usize) {
    let hits: Vec<(String, usize)> = production_sources()
        .into_iter()
        .map(|(path, content)| {
            let count = content.lines().filter(|line| line.contains(pattern)).count();
            (path.display().to_string(), count)
        })
        .filter(|(_, count)| *count > 0)
        .collect();
    let total: usize = hits.iter().map(|(_, c)| c).sum();
    let listing = hits
        .iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n");
    assert!(total <= max, "`{pattern}` budget exceeded: found {total}, max {max}.\n{listing}");
}

#[test]
fn no_unwrap() {
    assert_budget(".unwrap()", 0);
}

#[test]
fn no_expect() {
    assert_budget(".expect(", 0);
}

#[test]
fn no_panic() {
    assert_budget("panic!(", 0);
}

#[test]
fn no_unreachable() {
    assert_budget("unreachable!(", 0);
}

#[test]
fn no_todo_or_unimplemented() {
    assert_budget("todo!(", 0);
    assert_budget("unimplemented!(", 0);
}

#[test]
fn no_silent_discard() {
    assert_budget("let _ =", 0);
}

#[test]
fn dot_ok_budget() {
    assert_budget(".ok()", MAX_DOT_OK);
}

#[test]
fn no_allow_dead_code() {
    assert_budget("#[allow(dead_code)]", 0);
}
