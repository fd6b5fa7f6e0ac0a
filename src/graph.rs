use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::extract::extract_specifiers;
use crate::resolve::resolve_relative;
use crate::walker::collect_source_files;

/// Reverse dependency graph: file → set of files that directly import it.
///
/// Plain data, built fresh for one resolution run and read-only afterwards.
/// A file with zero importers has no entry; an absent key reads as the
/// empty set.
pub type DepGraph = HashMap<PathBuf, HashSet<PathBuf>>;

/// Build the reverse import graph for every source file under `root`.
///
/// For each collected file: read its text, extract static import specifiers,
/// resolve the relative ones against the file's directory, and record the
/// file as a dependent of each resolved target. Bare package specifiers
/// never produce edges. A file that cannot be read contributes no edges and
/// the build continues; a single bad file never aborts the scan.
pub fn build_dep_graph(
    root: &Path,
    extensions: &[String],
    ignored_dirs: &[String],
    verbose: bool,
) -> DepGraph {
    let mut graph: DepGraph = HashMap::new();

    for file in collect_source_files(root, extensions, ignored_dirs, verbose) {
        let content = match std::fs::read_to_string(&file) {
            Ok(c) => c,
            Err(err) => {
                eprintln!("warning: {}: {err}", file.display());
                continue;
            }
        };

        let dir = match file.parent() {
            Some(d) => d,
            None => continue,
        };

        for specifier in extract_specifiers(&content) {
            // Package-registry imports are outside the model.
            if !specifier.starts_with('.') {
                continue;
            }
            if let Some(target) = resolve_relative(&specifier, dir, extensions) {
                graph.entry(target).or_default().insert(file.clone());
            }
        }
    }

    graph
}
