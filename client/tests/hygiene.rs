//! Hygiene: enforces coding standards at test time
//!
//! Scans the client sources for call results thrown away with `let _ =`.
//! A failed request or navigation must at least reach the console log.
//! Discarding plain values to silence unused bindings in `ssr` stubs is fine.

use std::fs;
use std::path::PathBuf;

/// `console_log::init_with_level` in `lib.rs`: there is no logger to report to yet.
const MAX_DISCARDED_CALLS: usize = 1;

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
            } else if path.extension().is_some_and(|e| e == "rs") && !path.to_string_lossy().ends_with("_test.rs") {
                if let Ok(content) = fs::read_to_string(&path) {
                    out.push((path, content));
                }
            }
        }
    }
    out
}

/// `let _ = foo.bar(..)` discards a result; `let _ = (a, b);` and `let _ = x;` do not.
fn discards_call_result(line: &str) -> bool {
    line.trim_start()
        .strip_prefix("let _ = ")
        .is_some_and(|rhs| !rhs.starts_with('(') && rhs.contains('('))
}

#[test]
fn discarded_call_results_budget() {
    let hits: Vec<String> = production_sources()
        .into_iter()
        .flat_map(|(path, content)| {
            content
                .lines()
                .enumerate()
                .filter(|(_, line)| discards_call_result(line))
                .map(|(n, line)| format!("  {}:{}: {}", path.display(), n + 1, line.trim()))
                .collect::<Vec<_>>()
        })
        .collect();
    assert!(
        hits.len() <= MAX_DISCARDED_CALLS,
        "discarded call results: found {}, max {MAX_DISCARDED_CALLS}.\n{}",
        hits.len(),
        hits.join("\n")
    );
}

#[test]
fn classifier_tells_calls_from_bindings() {
    assert!(discards_call_result("        let _ = gloo_net::http::Request::post(\"/x\")"));
    assert!(discards_call_result("let _ = w.location().set_href(\"/login\");"));
    assert!(!discards_call_result("let _ = (user_id, project);"));
    assert!(!discards_call_result("let _ = req;"));
}

/// `GENERATION_FAILED` is only read inside the hydrate-only generate effect,
/// so an unconditional import of it is unused in `ssr` builds.
#[test]
fn hydrate_only_constant_is_path_qualified() {
    let page = fs::read_to_string("src/pages/new_project.rs").unwrap_or_default();
    let imported = page
        .lines()
        .filter(|line| line.starts_with("use "))
        .any(|line| line.contains("GENERATION_FAILED"));
    assert!(!imported, "import GENERATION_FAILED at its hydrate-only use site instead");
    assert!(page.contains("crate::state::upload::GENERATION_FAILED"));
}
