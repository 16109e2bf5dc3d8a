//! Coverage profile parsing and per-package aggregation
//!
//! Reads the text profile written by `go test -coverprofile`:
//!
//! ```text
//! mode: atomic
//! example.com/m/pkg/file.go:10.2,12.16 3 1
//! ```
//!
//! Each block line is `<file>:<start>,<end> <statements> <count>`. Blocks are
//! folded into statement totals keyed by the directory of `<file>`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use crate::error::{GotestError, GotestResult};

/// Package names longer than this are shortened in the text table.
const MAX_PACKAGE_WIDTH: usize = 58;
/// Characters kept from the end of a shortened package name.
const KEPT_SUFFIX: usize = 55;
const RULE_WIDTH: usize = 70;

/// Statement counters for one package
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoverageStats {
    pub total_statements: u64,
    pub covered_statements: u64,
}

impl CoverageStats {
    /// Fold one profile block into the counters.
    pub fn record(&mut self, statements: u64, count: u64) {
        self.total_statements += statements;
        if count > 0 {
            self.covered_statements += statements;
        }
    }

    /// Covered share in percent, `0.0` when there are no statements.
    pub fn percent(&self) -> f64 {
        if self.total_statements == 0 {
            return 0.0;
        }
        self.covered_statements as f64 / self.total_statements as f64 * 100.0
    }
}

/// Per-package counters, ordered by package path.
pub type CoverageMap = BTreeMap<String, CoverageStats>;

/// Parse a coverage profile from any buffered reader.
///
/// Lines that are not well-formed blocks are skipped; only read errors fail.
/// Statement and execution counts must be non-negative integers, so a block
/// with a negative count is skipped rather than added.
pub fn parse_profile<R: BufRead>(reader: R) -> std::io::Result<CoverageMap> {
    let mut stats = CoverageMap::new();

    for line in reader.lines() {
        let line = line?;
        if line.starts_with("mode:") {
            continue;
        }

        let Some((file, statements, count)) = parse_block(&line) else {
            continue;
        };

        stats
            .entry(package_of(file).to_string())
            .or_default()
            .record(statements, count);
    }

    Ok(stats)
}

/// Open and parse the profile at `path`.
pub fn read_profile(path: &Path) -> GotestResult<CoverageMap> {
    let file = File::open(path).map_err(|e| GotestError::io(path, e))?;
    parse_profile(BufReader::new(file)).map_err(|e| GotestError::io(path, e))
}

fn parse_block(line: &str) -> Option<(&str, u64, u64)> {
    let mut fields = line.split_whitespace();
    let (Some(location), Some(statements), Some(count), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return None;
    };

    // The range itself contains no colon, so the last one ends the file name.
    let (file, _range) = location.rsplit_once(':')?;
    let statements = statements.parse().ok()?;
    let count = count.parse().ok()?;

    Some((file, statements, count))
}

/// Directory part of a profile file path; profile paths always use `/`.
fn package_of(file: &str) -> &str {
    match file.rsplit_once('/') {
        Some(("", _)) => "/",
        Some((dir, _)) => dir,
        None => ".",
    }
}

/// Coverage of one package as reported in the summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageCoverage {
    pub package: String,
    pub total_statements: u64,
    pub covered_statements: u64,
    pub coverage: f64,
}

/// Per-package rows plus the grand total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageSummary {
    pub packages: Vec<PackageCoverage>,
    pub total_statements: u64,
    pub covered_statements: u64,
    pub coverage: f64,
}

impl CoverageSummary {
    pub fn from_map(map: &CoverageMap) -> Self {
        let mut total = CoverageStats::default();
        let packages = map
            .iter()
            .map(|(package, stats)| {
                total.total_statements += stats.total_statements;
                total.covered_statements += stats.covered_statements;
                PackageCoverage {
                    package: package.clone(),
                    total_statements: stats.total_statements,
                    covered_statements: stats.covered_statements,
                    coverage: stats.percent(),
                }
            })
            .collect();

        Self {
            packages,
            total_statements: total.total_statements,
            covered_statements: total.covered_statements,
            coverage: total.percent(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Summary output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format '{}'. Use 'text' or 'json'", s)),
        }
    }
}

/// Render the summary in the requested format.
pub fn format_summary(summary: &CoverageSummary, format: OutputFormat) -> GotestResult<String> {
    match format {
        OutputFormat::Text => Ok(format_summary_text(summary)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
    }
}

fn format_summary_text(summary: &CoverageSummary) -> String {
    if summary.is_empty() {
        return "No coverage data found\n".to_string();
    }

    let rule = "-".repeat(RULE_WIDTH);
    let mut output = String::new();

    output.push('\n');
    output.push_str(&format!("{:<61} {:>10}\n", "PACKAGE", "COVERAGE"));
    output.push_str(&rule);
    output.push('\n');

    for package in &summary.packages {
        output.push_str(&format_row(&display_name(&package.package), package.coverage));
    }

    output.push_str(&rule);
    output.push('\n');
    output.push_str(&format_row("TOTAL", summary.coverage));
    output.push_str(&format!(
        "\nStatements: {}/{} covered\n",
        summary.covered_statements, summary.total_statements
    ));

    output
}

fn format_row(name: &str, percent: f64) -> String {
    format!("{:<61} {:>8.1}%\n", name, percent)
}

fn display_name(package: &str) -> String {
    let len = package.chars().count();
    if len <= MAX_PACKAGE_WIDTH {
        return package.to_string();
    }
    let suffix: String = package.chars().skip(len - KEPT_SUFFIX).collect();
    format!("...{}", suffix)
}

/// Parse the profile at `path` and print its summary to stdout.
pub fn display_coverage_stats(path: &Path, format: OutputFormat) -> GotestResult<()> {
    let map = read_profile(path)?;
    let summary = CoverageSummary::from_map(&map);
    tracing::debug!(packages = summary.packages.len(), "parsed coverage profile");
    print!("{}", format_summary(&summary, format)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}
