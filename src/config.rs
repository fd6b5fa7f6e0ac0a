use std::path::Path;

use serde::Deserialize;

/// Extensions traced by default, in resolution priority order.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs"];

/// Directory names never descended into when scanning.
pub const DEFAULT_IGNORE: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "coverage",
    ".next",
];

/// Configuration loaded from `diff-test.toml` at the project root.
#[derive(Debug, Deserialize, Default)]
pub struct DiffTestConfig {
    /// File extensions to trace imports through (with leading dot), in resolution order.
    pub extensions: Option<Vec<String>>,
    /// Directory names to skip when building the import graph.
    pub ignore: Option<Vec<String>>,
    /// Custom test file patterns (regex), replacing the framework's builtin set.
    pub test_patterns: Option<Vec<String>>,
}

impl DiffTestConfig {
    /// Load configuration from `diff-test.toml` in the given root directory.
    ///
    /// Returns a default (empty) configuration if the file does not exist or cannot be parsed.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join("diff-test.toml");

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("warning: failed to parse diff-test.toml: {err}. Using defaults.");
                    Self::default()
                }
            },
            Err(err) => {
                eprintln!("warning: failed to read diff-test.toml: {err}. Using defaults.");
                Self::default()
            }
        }
    }

    /// The extension set to scan and resolve with: config override or the defaults.
    pub fn extensions(&self) -> Vec<String> {
        match &self.extensions {
            Some(exts) => exts.clone(),
            None => DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Directory names excluded from the scan: config override or the defaults.
    pub fn ignored_dirs(&self) -> Vec<String> {
        match &self.ignore {
            Some(dirs) => dirs.clone(),
            None => DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect(),
        }
    }
}
