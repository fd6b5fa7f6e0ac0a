use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};

use crate::framework::Framework;

/// Build the `npx` argv that runs the given test files.
///
/// Test paths are relativized to the project root for readable output and
/// shorter command lines; passthrough arguments land after the file list.
pub fn test_command(
    framework: Framework,
    test_files: &[PathBuf],
    root: &Path,
    passthrough: &[String],
) -> Vec<String> {
    let mut argv: Vec<String> = vec!["npx".to_string()];
    argv.extend(framework.command_prefix().iter().map(|s| s.to_string()));

    for file in test_files {
        let shown = file.strip_prefix(root).unwrap_or(file);
        argv.push(shown.to_string_lossy().into_owned());
    }

    argv.extend(passthrough.iter().cloned());
    argv
}

/// Run the affected tests with inherited stdio and return the child's exit code.
///
/// A missing exit code means the child was killed by a signal; that is
/// reported as failure (1).
pub fn run_tests(
    framework: Framework,
    test_files: &[PathBuf],
    root: &Path,
    passthrough: &[String],
) -> Result<i32> {
    let argv = test_command(framework, test_files, root, passthrough);

    let status = Command::new(&argv[0])
        .args(&argv[1..])
        .current_dir(root)
        .status()
        .with_context(|| format!("failed to run `{}`", argv.join(" ")))?;

    Ok(status.code().unwrap_or(1))
}
