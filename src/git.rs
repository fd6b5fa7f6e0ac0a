use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};

/// Locate the git repository root for `cwd` (or the process working directory).
///
/// Failure here is a configuration-level fault and propagates to the caller.
pub fn repo_root(cwd: Option<&Path>) -> Result<PathBuf> {
    let mut cmd = Command::new("git");
    cmd.args(["rev-parse", "--show-toplevel"]);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd.output().context("failed to run git rev-parse")?;
    if !output.status.success() {
        match cwd {
            Some(dir) => bail!("not a git repository: {}", dir.display()),
            None => bail!("not a git repository"),
        }
    }

    let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
    PathBuf::from(root)
        .canonicalize()
        .context("failed to canonicalize git repository root")
}

/// Files changed in the working copy, as canonical absolute paths.
///
/// - `base = Some(ref)`: diff against that ref;
/// - `staged = true`: staged changes only;
/// - otherwise: union of staged, unstaged, and untracked files.
///
/// git may report files that no longer exist on disk (deletions); those keep
/// their root-joined path. A fresh scan records no importers for them, so
/// they affect nothing downstream.
pub fn changed_files(root: &Path, base: Option<&str>, staged: bool) -> Result<Vec<PathBuf>> {
    let mut outputs: Vec<String> = Vec::new();

    if let Some(base_ref) = base {
        outputs.push(git_stdout(root, &["diff", "--name-only", base_ref])?);
    } else if staged {
        outputs.push(git_stdout(root, &["diff", "--cached", "--name-only"])?);
    } else {
        outputs.push(git_stdout(root, &["diff", "--cached", "--name-only"])?);
        outputs.push(git_stdout(root, &["diff", "--name-only"])?);
        outputs.push(git_stdout(root, &["ls-files", "--others", "--exclude-standard"])?);
    }

    // BTreeSet dedups across the three sources and keeps the result sorted.
    let mut files: BTreeSet<PathBuf> = BTreeSet::new();
    for output in &outputs {
        for line in output.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let joined = root.join(line);
            files.insert(joined.canonicalize().unwrap_or(joined));
        }
    }

    Ok(files.into_iter().collect())
}

/// Run git in `root` and return its stdout; a non-zero exit is a hard error.
fn git_stdout(root: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .with_context(|| format!("failed to run git {}", args.join(" ")))?;

    if !output.status.success() {
        bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
