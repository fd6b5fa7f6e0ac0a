use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

use anyhow::Context;
use regex::Regex;

use crate::framework::Framework;
use crate::graph::DepGraph;

/// Decides whether a file counts as a test under a set of naming patterns.
#[derive(Debug)]
pub struct TestMatcher {
    patterns: Vec<Regex>,
}

impl TestMatcher {
    /// Build a matcher from a framework's builtin pattern set.
    pub fn for_framework(framework: Framework) -> anyhow::Result<TestMatcher> {
        Self::from_patterns(framework.builtin_patterns())
    }

    /// Build a matcher from caller-supplied pattern strings.
    ///
    /// An invalid pattern is a caller configuration error and fails
    /// immediately; it must not degrade into a matcher that matches nothing.
    pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> anyhow::Result<TestMatcher> {
        let patterns = patterns
            .iter()
            .map(|p| {
                let p = p.as_ref();
                Regex::new(p).with_context(|| format!("invalid test pattern `{p}`"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(TestMatcher { patterns })
    }

    /// Does this file count as a test?
    ///
    /// Patterns are checked against both the base name and the full path,
    /// since some conventions are directory-based (`__tests__/`, `e2e/`)
    /// rather than suffix-based.
    pub fn is_test_file(&self, path: &Path) -> bool {
        let full = normalize_separators(&path.to_string_lossy());
        let base = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.patterns
            .iter()
            .any(|p| p.is_match(&base) || p.is_match(&full))
    }
}

/// Patterns are written with `/` separators; match against a slash-normalized
/// path so directory conventions hold on Windows too.
fn normalize_separators(path: &str) -> String {
    if std::path::MAIN_SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// All files that transitively depend on `file` through reverse import edges.
///
/// Explicit worklist + visited-set walk: a file reachable through several
/// paths (or a cycle) is visited once, and arbitrarily deep import chains
/// cannot overflow the call stack. The origin file is removed from its own
/// result before returning.
pub fn transitive_dependents(file: &Path, graph: &DepGraph) -> HashSet<PathBuf> {
    let mut visited: HashSet<PathBuf> = HashSet::new();
    let mut queue: VecDeque<PathBuf> = VecDeque::new();
    queue.push_back(file.to_path_buf());

    while let Some(current) = queue.pop_front() {
        if !visited.insert(current.clone()) {
            continue;
        }

        if let Some(importers) = graph.get(&current) {
            for importer in importers {
                if !visited.contains(importer) {
                    queue.push_back(importer.clone());
                }
            }
        }
    }

    visited.remove(file);
    visited
}

/// Find the test files affected by a set of changed files.
///
/// A test is affected if it was changed itself or if it imports a changed
/// file, directly or transitively. The union over all changed files is
/// returned sorted by path for deterministic downstream consumption.
pub fn find_affected_tests(
    changed_files: &[PathBuf],
    graph: &DepGraph,
    matcher: &TestMatcher,
) -> Vec<PathBuf> {
    let mut affected: HashSet<PathBuf> = HashSet::new();

    for changed in changed_files {
        if matcher.is_test_file(changed) {
            affected.insert(changed.clone());
        }

        for dependent in transitive_dependents(changed, graph) {
            if matcher.is_test_file(&dependent) {
                affected.insert(dependent);
            }
        }
    }

    let mut result: Vec<PathBuf> = affected.into_iter().collect();
    result.sort();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> PathBuf {
        PathBuf::from(s)
    }

    fn edge(graph: &mut DepGraph, importee: &str, importer: &str) {
        graph.entry(p(importee)).or_default().insert(p(importer));
    }

    fn vitest_matcher() -> TestMatcher {
        TestMatcher::for_framework(Framework::Vitest).expect("builtin patterns compile")
    }

    /// auth.ts and api.ts both import utils.ts; each has its own test file.
    fn diamond() -> DepGraph {
        let mut graph = DepGraph::new();
        edge(&mut graph, "/proj/utils.ts", "/proj/auth.ts");
        edge(&mut graph, "/proj/utils.ts", "/proj/api.ts");
        edge(&mut graph, "/proj/auth.ts", "/proj/auth.test.ts");
        edge(&mut graph, "/proj/api.ts", "/proj/api.test.ts");
        graph
    }

    #[test]
    fn test_diamond_dependency_affects_both_tests() {
        let graph = diamond();
        let affected = find_affected_tests(&[p("/proj/utils.ts")], &graph, &vitest_matcher());
        assert_eq!(
            affected,
            vec![p("/proj/api.test.ts"), p("/proj/auth.test.ts")],
            "a shared dependency change must reach both test files"
        );
    }

    #[test]
    fn test_isolation_of_sibling_branches() {
        let graph = diamond();
        let affected = find_affected_tests(&[p("/proj/api.ts")], &graph, &vitest_matcher());
        assert_eq!(
            affected,
            vec![p("/proj/api.test.ts")],
            "changing api.ts must not drag in auth.test.ts"
        );
    }

    #[test]
    fn test_direct_test_change_is_included() {
        let graph = DepGraph::new();
        let affected = find_affected_tests(&[p("/proj/auth.test.ts")], &graph, &vitest_matcher());
        assert_eq!(affected, vec![p("/proj/auth.test.ts")]);
    }

    #[test]
    fn test_noop_change_affects_nothing() {
        let graph = diamond();
        let affected = find_affected_tests(&[p("/proj/orphan.ts")], &graph, &vitest_matcher());
        assert!(affected.is_empty());
    }

    #[test]
    fn test_changed_file_not_in_own_dependents() {
        let graph = diamond();
        let dependents = transitive_dependents(&p("/proj/utils.ts"), &graph);
        assert!(
            !dependents.contains(&p("/proj/utils.ts")),
            "the origin must be excluded from its own dependents"
        );
        assert!(dependents.contains(&p("/proj/auth.ts")));
        assert!(dependents.contains(&p("/proj/api.test.ts")));
    }

    #[test]
    fn test_cycle_terminates_and_visits_once() {
        let mut graph = DepGraph::new();
        edge(&mut graph, "/proj/a.ts", "/proj/b.ts");
        edge(&mut graph, "/proj/b.ts", "/proj/a.ts");
        edge(&mut graph, "/proj/a.ts", "/proj/a.test.ts");

        let dependents = transitive_dependents(&p("/proj/a.ts"), &graph);
        assert!(dependents.contains(&p("/proj/b.ts")));
        assert!(dependents.contains(&p("/proj/a.test.ts")));
        // a.ts is reachable through the cycle but is still the origin.
        assert!(!dependents.contains(&p("/proj/a.ts")));
    }

    #[test]
    fn test_missing_changed_file_contributes_nothing() {
        let graph = diamond();
        let affected = find_affected_tests(&[p("/proj/deleted.ts")], &graph, &vitest_matcher());
        assert!(affected.is_empty(), "an absent graph key is an empty set");
    }

    #[test]
    fn test_union_across_changed_files_is_sorted() {
        let graph = diamond();
        let changed = vec![p("/proj/api.ts"), p("/proj/auth.ts")];
        let affected = find_affected_tests(&changed, &graph, &vitest_matcher());
        assert_eq!(
            affected,
            vec![p("/proj/api.test.ts"), p("/proj/auth.test.ts")]
        );

        let again = find_affected_tests(&changed, &graph, &vitest_matcher());
        assert_eq!(affected, again, "identical input must produce identical output");
    }

    #[test]
    fn test_builtin_patterns_classify_conventions() {
        let vitest = vitest_matcher();
        assert!(vitest.is_test_file(&p("/proj/src/foo.test.ts")));
        assert!(vitest.is_test_file(&p("/proj/src/foo.spec.tsx")));
        assert!(vitest.is_test_file(&p("/proj/src/__tests__/bar.ts")));
        assert!(!vitest.is_test_file(&p("/proj/src/foo.ts")));

        let playwright =
            TestMatcher::for_framework(Framework::Playwright).expect("builtin patterns compile");
        assert!(playwright.is_test_file(&p("/proj/e2e/login.spec.ts")));
        assert!(playwright.is_test_file(&p("/proj/tests/checkout.ts")));
        assert!(
            !playwright.is_test_file(&p("/proj/src/login.test.ts")),
            "playwright does not use the .test. suffix convention"
        );
    }

    #[test]
    fn test_custom_patterns_replace_builtins() {
        let matcher = TestMatcher::from_patterns(&["integration/.+\\.ts$"]).unwrap();
        assert!(matcher.is_test_file(&p("/proj/integration/db.ts")));
        assert!(!matcher.is_test_file(&p("/proj/src/db.test.ts")));
    }

    #[test]
    fn test_invalid_custom_pattern_is_fatal() {
        let err = TestMatcher::from_patterns(&["(unclosed"]).unwrap_err();
        assert!(
            err.to_string().contains("(unclosed"),
            "error should name the offending pattern, got: {err}"
        );
    }
}
