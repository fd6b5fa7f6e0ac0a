use std::collections::HashMap;
use std::path::Path;

use clap::ValueEnum;
use serde::Deserialize;

/// A supported test framework.
///
/// Uses a plain enum (not trait objects) to avoid `dyn` overhead. Cheap to
/// copy and pattern-matched at dispatch boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Framework {
    Vitest,
    Jest,
    Mocha,
    Playwright,
}

/// Minimal package.json representation for framework detection.
#[derive(Debug, Deserialize)]
struct PackageJson {
    #[serde(default)]
    dependencies: HashMap<String, serde_json::Value>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: HashMap<String, serde_json::Value>,
}

impl PackageJson {
    fn has_dependency(&self, name: &str) -> bool {
        self.dependencies.contains_key(name) || self.dev_dependencies.contains_key(name)
    }
}

/// Manifest detection order: the first dependency found wins.
const MANIFEST_PRIORITY: &[(&str, Framework)] = &[
    ("vitest", Framework::Vitest),
    ("@playwright/test", Framework::Playwright),
    ("jest", Framework::Jest),
    ("mocha", Framework::Mocha),
];

/// Config files that signal a framework's presence at a project root.
const CONFIG_FILES: &[(&str, Framework)] = &[
    ("vitest.config.ts", Framework::Vitest),
    ("vitest.config.js", Framework::Vitest),
    ("vite.config.ts", Framework::Vitest),
    ("playwright.config.ts", Framework::Playwright),
    ("playwright.config.js", Framework::Playwright),
    ("jest.config.ts", Framework::Jest),
    ("jest.config.js", Framework::Jest),
    ("jest.config.json", Framework::Jest),
    (".mocharc.yml", Framework::Mocha),
    (".mocharc.json", Framework::Mocha),
];

impl Framework {
    /// Builtin test-file patterns for this framework, as regex source strings.
    ///
    /// Frameworks differ only in which conventional suffixes and directories
    /// count as tests; the matcher applying these is framework-agnostic.
    pub fn builtin_patterns(&self) -> &'static [&'static str] {
        match self {
            Framework::Vitest | Framework::Jest => &[
                r"\.test\.[tjm]sx?$",
                r"\.spec\.[tjm]sx?$",
                r"__tests__/.+\.[tjm]sx?$",
            ],
            Framework::Mocha => &[
                r"\.test\.[tjm]sx?$",
                r"\.spec\.[tjm]sx?$",
                r"test/.+\.[tjm]sx?$",
            ],
            Framework::Playwright => &[
                r"\.spec\.[tjm]sx?$",
                r"e2e/.+\.[tjm]sx?$",
                r"tests/.+\.[tjm]sx?$",
            ],
        }
    }

    /// Leading argv fragment of the `npx` invocation for this framework.
    pub fn command_prefix(&self) -> &'static [&'static str] {
        match self {
            Framework::Vitest => &["vitest", "run"],
            Framework::Jest => &["jest"],
            Framework::Mocha => &["mocha"],
            Framework::Playwright => &["playwright", "test"],
        }
    }

    /// Human-readable display name for report output.
    pub fn display_name(&self) -> &'static str {
        match self {
            Framework::Vitest => "vitest",
            Framework::Jest => "jest",
            Framework::Mocha => "mocha",
            Framework::Playwright => "playwright",
        }
    }

    /// Auto-detect the test framework for a project root.
    ///
    /// package.json dependencies win over config-file presence; within the
    /// manifest the priority is vitest, playwright, jest, mocha. Falls back
    /// to vitest when nothing is recognized.
    pub fn detect(root: &Path) -> Framework {
        if let Some(framework) = detect_from_manifest(root) {
            return framework;
        }

        for (file, framework) in CONFIG_FILES {
            if root.join(file).exists() {
                return *framework;
            }
        }

        Framework::Vitest
    }
}

/// Probe package.json for a known test-framework dependency.
///
/// A missing manifest is normal; a malformed one is reported as a warning
/// and detection falls through to config-file probing.
fn detect_from_manifest(root: &Path) -> Option<Framework> {
    let manifest_path = root.join("package.json");
    let contents = std::fs::read_to_string(&manifest_path).ok()?;

    let pkg: PackageJson = match serde_json::from_str(&contents) {
        Ok(p) => p,
        Err(err) => {
            eprintln!("warning: failed to parse package.json: {err}");
            return None;
        }
    };

    MANIFEST_PRIORITY
        .iter()
        .find(|(dep, _)| pkg.has_dependency(dep))
        .map(|(_, framework)| *framework)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("tempdir")
    }

    #[test]
    fn test_detect_from_dependencies() {
        let dir = tmp();
        fs::write(
            dir.path().join("package.json"),
            r#"{"dependencies": {"jest": "^29.0.0"}}"#,
        )
        .unwrap();
        assert_eq!(Framework::detect(dir.path()), Framework::Jest);
    }

    #[test]
    fn test_detect_from_dev_dependencies() {
        let dir = tmp();
        fs::write(
            dir.path().join("package.json"),
            r#"{"devDependencies": {"mocha": "^10.0.0"}}"#,
        )
        .unwrap();
        assert_eq!(Framework::detect(dir.path()), Framework::Mocha);
    }

    #[test]
    fn test_manifest_priority_vitest_beats_jest() {
        let dir = tmp();
        fs::write(
            dir.path().join("package.json"),
            r#"{"devDependencies": {"jest": "^29.0.0", "vitest": "^2.0.0"}}"#,
        )
        .unwrap();
        assert_eq!(Framework::detect(dir.path()), Framework::Vitest);
    }

    #[test]
    fn test_manifest_beats_config_file() {
        let dir = tmp();
        fs::write(
            dir.path().join("package.json"),
            r#"{"devDependencies": {"@playwright/test": "^1.0.0"}}"#,
        )
        .unwrap();
        fs::write(dir.path().join("jest.config.js"), "module.exports = {}").unwrap();
        assert_eq!(Framework::detect(dir.path()), Framework::Playwright);
    }

    #[test]
    fn test_detect_from_config_file() {
        let dir = tmp();
        fs::write(dir.path().join("playwright.config.ts"), "export default {}").unwrap();
        assert_eq!(Framework::detect(dir.path()), Framework::Playwright);
    }

    #[test]
    fn test_malformed_manifest_falls_through() {
        let dir = tmp();
        fs::write(dir.path().join("package.json"), "{not json").unwrap();
        fs::write(dir.path().join("jest.config.json"), "{}").unwrap();
        assert_eq!(Framework::detect(dir.path()), Framework::Jest);
    }

    #[test]
    fn test_default_is_vitest() {
        let dir = tmp();
        assert_eq!(Framework::detect(dir.path()), Framework::Vitest);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Framework::Vitest.display_name(), "vitest");
        assert_eq!(Framework::Playwright.display_name(), "playwright");
    }
}
