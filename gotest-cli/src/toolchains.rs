//! External tool detection
//!
//! - Go: resolved through `PATH` (or taken as given when it is a path)
//! - Document opener: `open` on macOS, `xdg-open` on Linux, `cmd /c start`
//!   on Windows

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{GotestError, GotestResult};

/// Resolve the go binary to an executable path.
pub fn locate_go(name: &str) -> GotestResult<PathBuf> {
    let go = which::which(name).map_err(|source| GotestError::ToolNotFound {
        tool: name.to_string(),
        source,
    })?;
    tracing::debug!(go = %go.display(), "located go toolchain");
    Ok(go)
}

/// Build the command that opens `path` with the desktop's default handler.
pub fn opener_command(path: &Path) -> GotestResult<Command> {
    opener_for(std::env::consts::OS, path)
}

fn opener_for(os: &str, path: &Path) -> GotestResult<Command> {
    let cmd = match os {
        "macos" => {
            let mut cmd = Command::new("open");
            cmd.arg(path);
            cmd
        }
        "linux" => {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(path);
            cmd
        }
        "windows" => {
            let mut cmd = Command::new("cmd");
            cmd.args(["/c", "start"]).arg(path);
            cmd
        }
        other => return Err(GotestError::UnsupportedPlatform(other.to_string())),
    };
    Ok(cmd)
}
