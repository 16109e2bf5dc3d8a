//! The gotest pipeline: discover, test, summarize, report.

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::coverage;
use crate::discover;
use crate::error::GotestError;
use crate::report;
use crate::runner;
use crate::toolchains;

const BANNER_WIDTH: usize = 60;

/// How a run ended when nothing went wrong outside of the tests themselves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    NoPackages,
    Completed { tests_passed: bool },
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        match self {
            Self::NoPackages => true,
            Self::Completed { tests_passed } => *tests_passed,
        }
    }
}

/// Run the whole pipeline. Errors carry the step that failed as context.
pub fn run(cli: &Cli) -> Result<RunOutcome> {
    let packages =
        discover::find_packages(&cli.root, &cli.ignore).context("finding go packages")?;

    if packages.is_empty() {
        println!("No Go packages found");
        return Ok(RunOutcome::NoPackages);
    }

    if cli.detail {
        println!("Found {} package(s) with Go files:", packages.len());
        for package in &packages {
            println!("  - {}", package);
        }
        println!();
    } else {
        println!("Testing {} package(s)...", packages.len());
    }

    let go = toolchains::locate_go(&cli.go).context("locating go toolchain")?;
    let profile = cli.profile_path().context("resolving coverage profile path")?;
    let html = cli.html_path().context("resolving coverage report path")?;

    runner::remove_stale_profile(&profile).context("removing stale coverage profile")?;
    let args = runner::go_test_args(&profile, cli.covermode, &cli.go_test_args, &packages);
    let outcome =
        runner::run_tests(&go, &cli.root, &args, cli.detail).context("running go test")?;
    tracing::info!(passed = outcome.passed, "go test finished");

    if !profile.exists() {
        return Err(GotestError::ProfileMissing(profile).into());
    }

    let banner = "=".repeat(BANNER_WIDTH);
    println!();
    println!("{}", banner);
    println!("COVERAGE SUMMARY");
    println!("{}", banner);

    if let Err(e) = coverage::display_coverage_stats(&profile, cli.format) {
        eprintln!(
            "Warning: could not parse coverage stats: {:#}",
            anyhow::Error::from(e)
        );
    }

    println!("{}", banner);

    report::generate_html(&go, &cli.root, &profile, &html, cli.detail)
        .context("generating coverage HTML")?;

    if cli.no_open {
        println!("\nCoverage report: {}", html.display());
    } else {
        report::open_report(&html).context("opening browser")?;
    }

    Ok(RunOutcome::Completed {
        tests_passed: outcome.passed,
    })
}
