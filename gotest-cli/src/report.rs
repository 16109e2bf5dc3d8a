//! HTML coverage report rendering and opening

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{GotestError, GotestResult};
use crate::toolchains;

/// Arguments for `go tool cover` rendering `profile` into `html`.
pub fn cover_html_args(profile: &Path, html: &Path) -> Vec<String> {
    vec![
        "tool".to_string(),
        "cover".to_string(),
        format!("-html={}", profile.display()),
        "-o".to_string(),
        html.display().to_string(),
    ]
}

/// Render the HTML report with `go tool cover`.
pub fn generate_html(go: &Path, root: &Path, profile: &Path, html: &Path, detail: bool) -> GotestResult<()> {
    let args = cover_html_args(profile, html);
    let command = format!("go {}", args.join(" "));

    if detail {
        println!("\nGenerating coverage report: {}", html.display());
    }
    tracing::debug!(command = %command, "rendering coverage report");

    let (stdout, stderr) = if detail {
        (Stdio::inherit(), Stdio::inherit())
    } else {
        (Stdio::null(), Stdio::null())
    };

    let status = Command::new(go)
        .args(&args)
        .current_dir(root)
        .stdout(stdout)
        .stderr(stderr)
        .status()
        .map_err(|e| GotestError::spawn(&command, e))?;

    if !status.success() {
        return Err(GotestError::command_failed(command, status));
    }
    Ok(())
}

/// Hand the report to the platform opener without waiting for it.
pub fn open_report(html: &Path) -> GotestResult<()> {
    println!("\nOpening {} in browser...", html.display());

    let mut cmd = toolchains::opener_command(html)?;
    let program = cmd.get_program().to_string_lossy().into_owned();
    cmd.stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| GotestError::spawn(program, e))?;
    Ok(())
}
