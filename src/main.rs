mod cli;
mod config;
mod extract;
mod finder;
mod framework;
mod git;
mod graph;
mod output;
mod resolve;
mod runner;
mod walker;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;
use config::DiffTestConfig;
use finder::{TestMatcher, find_affected_tests};
use framework::Framework;
use graph::build_dep_graph;
use output::{RunReport, print_summary};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let exit_code = run(cli)?;
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    // Project root: --cwd if given, the git toplevel otherwise.
    let project_root: PathBuf = match &cli.cwd {
        Some(dir) => dir
            .canonicalize()
            .with_context(|| format!("invalid --cwd: {}", dir.display()))?,
        None => git::repo_root(None)?,
    };

    // Changed files are reported relative to the repository root, which may
    // sit above --cwd.
    let repo_root = git::repo_root(Some(&project_root))?;

    let config = DiffTestConfig::load(&project_root);
    let framework = cli
        .framework
        .unwrap_or_else(|| Framework::detect(&project_root));

    // A malformed custom pattern must fail before any scanning happens.
    let matcher = match &config.test_patterns {
        Some(patterns) => TestMatcher::from_patterns(patterns)?,
        None => TestMatcher::for_framework(framework)?,
    };

    let changed_files = git::changed_files(&repo_root, cli.base.as_deref(), cli.staged)?;
    if changed_files.is_empty() {
        if cli.json {
            print_summary(&RunReport::new(framework, &project_root, &[], &[]), true);
        } else {
            println!("No changes detected.");
        }
        return Ok(0);
    }

    let extensions = config.extensions();
    let ignored_dirs = config.ignored_dirs();
    let graph = build_dep_graph(&project_root, &extensions, &ignored_dirs, cli.verbose);

    let affected_tests = find_affected_tests(&changed_files, &graph, &matcher);
    let mut report = RunReport::new(framework, &project_root, &changed_files, &affected_tests);

    if affected_tests.is_empty() {
        if cli.json {
            print_summary(&report, true);
        } else {
            println!("Changed files: {}", report.changed_files.len());
            println!("No test files affected by changes.");
        }
        return Ok(0);
    }

    if cli.dry_run {
        print_summary(&report, cli.json);
        return Ok(0);
    }

    if !cli.json {
        print_summary(&report, false);
        println!();
    }

    let exit_code = runner::run_tests(framework, &affected_tests, &project_root, &cli.passthrough)?;
    report.executed = true;
    report.exit_code = Some(exit_code);

    if cli.json {
        print_summary(&report, true);
    }

    Ok(exit_code)
}
