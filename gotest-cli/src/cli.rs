//! Command-line interface
//!
//! gotest's own options may be interleaved with `go test` flags, e.g.
//! `gotest -v -i gen -race -d`. [`partition_args`] pulls gotest's options
//! out first and clap only ever sees those; everything else is forwarded to
//! `go test` untouched and in order.

use std::path::{Path, PathBuf};

use clap::builder::FalseyValueParser;
use clap::Parser;

use crate::coverage::OutputFormat;
use crate::error::{GotestError, GotestResult};
use crate::runner::CoverMode;

const EXAMPLES: &str = "\
Examples:
  gotest                              Run all tests (minimal output)
  gotest -d                           Run with detailed output
  gotest -i example,pb                Ignore packages containing \"example\" or \"pb\"
  gotest --ignore=cmd,testdata        Same as above with = syntax
  gotest -i generated -v              Ignore + verbose go test output
  gotest -run TestFoo                 Run specific tests
  gotest --format json --no-open      Print the summary as JSON, keep the browser closed

All other flags are passed directly to 'go test'. See 'go help test' for details.";

/// gotest - Run go test recursively with coverage
///
/// Finds all Go packages in the root directory and its subdirectories, runs
/// 'go test' with coverage, displays coverage statistics, and opens the HTML
/// report in your browser.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "gotest")]
#[command(version, about, long_about = None, after_help = EXAMPLES)]
pub struct Cli {
    /// Show detailed test output (default: minimal output)
    #[arg(short, long)]
    pub detail: bool,

    /// Ignore packages matching patterns (comma-separated)
    #[arg(short, long, value_name = "PATTERNS", value_delimiter = ',')]
    pub ignore: Vec<String>,

    /// Directory to discover packages in and run go test from
    #[arg(long, env = "GOTEST_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Coverage profile written by go test
    #[arg(long, env = "GOTEST_PROFILE", default_value = "/tmp/cover.out")]
    pub profile: PathBuf,

    /// HTML coverage report
    #[arg(long, env = "GOTEST_HTML", default_value = "/tmp/cover.html")]
    pub html: PathBuf,

    /// Coverage mode passed to go test
    #[arg(long, value_enum, default_value_t = CoverMode::Atomic)]
    pub covermode: CoverMode,

    /// Go binary, by name or path
    #[arg(long, env = "GOTEST_GO", default_value = "go")]
    pub go: String,

    /// Coverage summary format (text or json)
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Render the HTML report without opening it
    #[arg(long, env = "GOTEST_NO_OPEN", value_parser = FalseyValueParser::new())]
    pub no_open: bool,

    /// Arguments forwarded to go test
    #[arg(skip)]
    pub go_test_args: Vec<String>,
}

impl Cli {
    /// Parse gotest's arguments (without the program name).
    pub fn try_parse_args<I, S>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (own, passthrough) = partition_args(args);
        let mut cli = Self::try_parse_from(std::iter::once("gotest".to_string()).chain(own))?;
        cli.ignore = normalize_patterns(&cli.ignore);
        cli.go_test_args = passthrough;
        Ok(cli)
    }

    /// Profile path that stays valid after go changes into `root`.
    pub fn profile_path(&self) -> GotestResult<PathBuf> {
        absolute(&self.profile)
    }

    pub fn html_path(&self) -> GotestResult<PathBuf> {
        absolute(&self.html)
    }
}

fn absolute(path: &Path) -> GotestResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| GotestError::io(".", e))?;
    Ok(cwd.join(path))
}

fn normalize_patterns(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Options that take a value and only exist in `--long` form.
const VALUE_OPTIONS: [&str; 6] = [
    "--root",
    "--profile",
    "--html",
    "--covermode",
    "--go",
    "--format",
];

/// Split raw arguments into gotest's own (normalized for clap) and the
/// passthrough arguments for `go test`.
pub fn partition_args<I, S>(args: I) -> (Vec<String>, Vec<String>)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut own = Vec::new();
    let mut passthrough = Vec::new();
    let mut args = args.into_iter().map(Into::into);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--" => {
                passthrough.extend(args.by_ref());
            }
            "-d" | "--detail" | "-detail" => own.push("--detail".to_string()),
            "-h" | "--help" | "-help" => own.push("--help".to_string()),
            "-V" | "--version" => own.push("--version".to_string()),
            "--no-open" => own.push(arg),
            "-i" | "--ignore" | "-ignore" => {
                // A trailing -i without patterns is dropped.
                if let Some(value) = args.next() {
                    own.push(format!("--ignore={}", value));
                }
            }
            _ => {
                if let Some(value) = ignore_value(&arg) {
                    own.push(format!("--ignore={}", value));
                } else if VALUE_OPTIONS.contains(&arg.as_str()) {
                    own.push(arg);
                    own.extend(args.next());
                } else if is_value_option_with_equals(&arg) {
                    own.push(arg);
                } else {
                    passthrough.push(arg);
                }
            }
        }
    }

    (own, passthrough)
}

fn ignore_value(arg: &str) -> Option<&str> {
    ["-i=", "--ignore=", "-ignore="]
        .iter()
        .find_map(|prefix| arg.strip_prefix(prefix))
}

fn is_value_option_with_equals(arg: &str) -> bool {
    arg.split_once('=')
        .map_or(false, |(name, _)| VALUE_OPTIONS.contains(&name))
}
