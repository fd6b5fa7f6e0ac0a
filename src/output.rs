use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::framework::Framework;

/// The outcome of one diff-test run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Framework the affected tests belong to.
    pub framework: String,
    /// Files changed in git, relative to the project root.
    pub changed_files: Vec<String>,
    /// Test files affected by the changes, relative to the project root.
    pub affected_tests: Vec<String>,
    /// Whether the test runner was actually invoked.
    pub executed: bool,
    /// Exit code from the test runner (null on dry runs).
    pub exit_code: Option<i32>,
}

impl RunReport {
    /// Assemble a report with paths relativized to the project root.
    pub fn new(
        framework: Framework,
        root: &Path,
        changed_files: &[PathBuf],
        affected_tests: &[PathBuf],
    ) -> RunReport {
        RunReport {
            framework: framework.display_name().to_string(),
            changed_files: changed_files.iter().map(|p| display_path(p, root)).collect(),
            affected_tests: affected_tests.iter().map(|p| display_path(p, root)).collect(),
            executed: false,
            exit_code: None,
        }
    }
}

/// Relativize a path against the project root for display.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

/// Print a run report.
///
/// - `json = true`: emit a pretty-printed JSON object to stdout.
/// - `json = false`: emit a human-readable summary to stdout.
///
/// Warnings and progress always go to **stderr** so the stdout stream stays
/// clean for downstream JSON consumers.
pub fn print_summary(report: &RunReport, json: bool) {
    if json {
        match serde_json::to_string_pretty(report) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("error serialising report: {}", e),
        }
        return;
    }

    println!("Changed files: {}", report.changed_files.len());
    println!("Affected tests: {}", report.affected_tests.len());

    if !report.affected_tests.is_empty() {
        println!();
        for test in &report.affected_tests {
            println!("  {}", test);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_relativizes_paths() {
        let root = PathBuf::from("/proj");
        let report = RunReport::new(
            Framework::Vitest,
            &root,
            &[root.join("src/utils.ts")],
            &[root.join("src/utils.test.ts")],
        );
        assert_eq!(report.changed_files, vec!["src/utils.ts"]);
        assert_eq!(report.affected_tests, vec!["src/utils.test.ts"]);
        assert_eq!(report.framework, "vitest");
        assert!(!report.executed);
        assert!(report.exit_code.is_none());
    }

    #[test]
    fn test_report_serializes_to_json() {
        let root = PathBuf::from("/proj");
        let mut report = RunReport::new(Framework::Jest, &root, &[], &[]);
        report.executed = true;
        report.exit_code = Some(0);

        let json = serde_json::to_string(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["framework"], "jest");
        assert_eq!(value["executed"], true);
        assert_eq!(value["exit_code"], 0);
        assert!(value["affected_tests"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_path_outside_root_stays_absolute() {
        let root = PathBuf::from("/proj");
        let report = RunReport::new(
            Framework::Vitest,
            &root,
            &[PathBuf::from("/elsewhere/a.ts")],
            &[],
        );
        assert_eq!(report.changed_files, vec!["/elsewhere/a.ts"]);
    }
}
