use std::path::{Path, PathBuf};

/// Walk a project directory and collect all source files whose names end with
/// one of the configured extensions.
///
/// Respects `.gitignore` rules even when the directory is not inside a git
/// repository, and skips any path containing an ignored directory component
/// (`node_modules`, build output, and friends). Every returned path is
/// canonicalized so the same file always yields the same graph key.
///
/// When `verbose` is true, each collected file path is printed to stderr.
pub fn collect_source_files(
    root: &Path,
    extensions: &[String],
    ignored_dirs: &[String],
    verbose: bool,
) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let walker = ignore::WalkBuilder::new(root)
        .standard_filters(true)
        .require_git(false)
        .build();

    for result in walker {
        let entry = match result {
            Ok(e) => e,
            Err(err) => {
                eprintln!("warning: {err}");
                continue;
            }
        };

        let path = entry.path();

        // Skip directories (we only want files).
        if entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false) {
            continue;
        }

        if path_has_ignored_component(path, ignored_dirs) {
            continue;
        }

        // Filter by extension. `ends_with` rather than `Path::extension` so
        // multi-dot suffixes like `.test.ts` still match their tail.
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n,
            None => continue,
        };
        if !extensions.iter().any(|ext| name.ends_with(ext.as_str())) {
            continue;
        }

        let canonical = match path.canonicalize() {
            Ok(p) => p,
            Err(err) => {
                eprintln!("warning: {}: {err}", path.display());
                continue;
            }
        };

        if verbose {
            eprintln!("{}", canonical.display());
        }

        files.push(canonical);
    }

    files
}

/// Returns true if any component of `path` matches one of the ignored directory names.
fn path_has_ignored_component(path: &Path, ignored_dirs: &[String]) -> bool {
    path.components().any(|c| {
        c.as_os_str()
            .to_str()
            .map(|s| ignored_dirs.iter().any(|d| d == s))
            .unwrap_or(false)
    })
}
