//! `go test` invocation
//!
//! Detail mode streams go's output straight to the terminal. Otherwise the
//! output is captured and, on failure, only the lines that look like test
//! failures are printed.

use std::fmt;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{GotestError, GotestResult};

/// Go coverage mode passed as `-covermode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CoverMode {
    Set,
    Count,
    #[default]
    Atomic,
}

impl fmt::Display for CoverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set => write!(f, "set"),
            Self::Count => write!(f, "count"),
            Self::Atomic => write!(f, "atomic"),
        }
    }
}

/// Result of one `go test` run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestOutcome {
    pub passed: bool,
}

/// Arguments for `go`: coverage flags, then user flags, then packages.
pub fn go_test_args(
    profile: &Path,
    mode: CoverMode,
    user_args: &[String],
    packages: &[String],
) -> Vec<String> {
    let mut args = vec![
        "test".to_string(),
        format!("-coverprofile={}", profile.display()),
        format!("-covermode={}", mode),
    ];
    args.extend(user_args.iter().cloned());
    args.extend(packages.iter().cloned());
    args
}

/// Delete a profile left behind by an earlier run so it cannot be mistaken
/// for this run's output.
pub fn remove_stale_profile(profile: &Path) -> GotestResult<()> {
    match std::fs::remove_file(profile) {
        Ok(()) => {
            tracing::debug!(profile = %profile.display(), "removed stale coverage profile");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(GotestError::io(profile, e)),
    }
}

/// Run `go` with `args` inside `root`.
///
/// A failing test run is reported through [`TestOutcome`]; only a failure to
/// start go at all is an error.
pub fn run_tests(go: &Path, root: &Path, args: &[String], detail: bool) -> GotestResult<TestOutcome> {
    let command = format!("go {}", args.join(" "));
    tracing::debug!(command = %command, root = %root.display(), "running go test");

    let mut cmd = Command::new(go);
    cmd.args(args).current_dir(root);

    let passed = if detail {
        println!("Running: {}\n", command);
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| GotestError::spawn(&command, e))?
            .success()
    } else {
        let output = cmd
            .stdin(Stdio::null())
            .output()
            .map_err(|e| GotestError::spawn(&command, e))?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));

            println!("\n--- TEST ERRORS ---");
            for line in error_lines(&combined) {
                println!("{}", line);
            }
            println!("-------------------");
        }
        output.status.success()
    };

    if passed {
        println!("All tests passed");
    } else {
        eprintln!("\nTests failed");
    }

    Ok(TestOutcome { passed })
}

/// Lines of go test output that describe failures, panics or assertion
/// mismatches.
pub fn error_lines(output: &str) -> impl Iterator<Item = &str> {
    output.lines().filter(|line| is_error_line(line))
}

fn is_error_line(line: &str) -> bool {
    const MARKERS: [&str; 5] = ["FAIL", "Error", "error", "panic", "_test.go:"];
    const PREFIXES: [&str; 3] = ["got:", "want:", "expected"];

    if MARKERS.iter().any(|marker| line.contains(marker)) {
        return true;
    }
    let trimmed = line.trim();
    PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix))
}
