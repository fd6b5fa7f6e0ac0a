use std::path::PathBuf;

use clap::Parser;

use crate::framework::Framework;

/// Run only the tests affected by your git changes.
///
/// diff-test builds a reverse import graph of the project, intersects it with
/// the files changed in git, and hands the affected test files to your test
/// framework, so a one-line change no longer pays for the whole suite.
#[derive(Parser, Debug)]
#[command(
    name = "diff-test",
    version,
    about,
    long_about = None,
    after_help = "Pass arguments through to the test framework after `--`:\n  diff-test -- --reporter verbose"
)]
pub struct Cli {
    /// Test framework to use. Auto-detected from package.json and config files if omitted.
    #[arg(long, value_enum)]
    pub framework: Option<Framework>,

    /// Git ref to diff against (e.g. "main", "HEAD~3"). Default: staged + unstaged + untracked changes.
    #[arg(long)]
    pub base: Option<String>,

    /// Only consider staged changes.
    #[arg(long)]
    pub staged: bool,

    /// Show affected test files without running them.
    #[arg(long)]
    pub dry_run: bool,

    /// Project root directory. Default: the git repository root.
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Output the run report as JSON instead of human-readable text.
    #[arg(long)]
    pub json: bool,

    /// Print each scanned file path during graph construction.
    #[arg(short, long)]
    pub verbose: bool,

    /// Arguments passed through to the test framework.
    #[arg(last = true)]
    pub passthrough: Vec<String>,
}
