use std::path::{Path, PathBuf};

/// Resolve a relative import specifier from the directory of the referencing
/// file to a canonical file identity on disk.
///
/// Resolution order, first success wins:
/// 1. the joined path names a regular file;
/// 2. the joined path plus each configured extension, in extension order;
/// 3. the joined path is a directory containing an `index` file with one of
///    the configured extensions, tried in extension order.
///
/// Returns `None` when nothing matches or the match cannot be canonicalized;
/// a broken or bundler-specific import must not abort the graph build.
pub fn resolve_relative(
    specifier: &str,
    from_dir: &Path,
    extensions: &[String],
) -> Option<PathBuf> {
    let base = from_dir.join(specifier);

    // Exact file match wins over extension probing.
    if base.is_file() {
        return base.canonicalize().ok();
    }

    // Probe with each configured extension appended.
    for ext in extensions {
        let mut candidate = base.clone().into_os_string();
        candidate.push(ext.as_str());
        let candidate = PathBuf::from(candidate);
        if candidate.is_file() {
            return candidate.canonicalize().ok();
        }
    }

    // Directory import: resolve to its index file.
    if base.is_dir() {
        for ext in extensions {
            let index = base.join(format!("index{ext}"));
            if index.is_file() {
                return index.canonicalize().ok();
            }
        }
    }

    None
}
