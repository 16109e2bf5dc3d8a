//! # gotest
//!
//! Runs `go test` over every package below a directory with coverage
//! enabled, prints per-package statement coverage, and opens the HTML
//! report rendered by `go tool cover`.
//!
//! ```bash
//! gotest                       # all packages, minimal output
//! gotest -d -race              # stream go output, forward -race
//! gotest -i generated,pb       # skip directories containing these
//! ```
//!
//! ## Environment Variables
//!
//! - `GOTEST_ROOT`, `GOTEST_PROFILE`, `GOTEST_HTML`, `GOTEST_GO`,
//!   `GOTEST_NO_OPEN`: defaults for the matching options
//! - `RUST_LOG`: diagnostic log filter (default `warn`)

pub mod app;
pub mod cli;
pub mod coverage;
pub mod discover;
pub mod error;
pub mod report;
pub mod runner;
pub mod toolchains;

pub use app::{run, RunOutcome};
pub use cli::Cli;
pub use error::{GotestError, GotestResult};
