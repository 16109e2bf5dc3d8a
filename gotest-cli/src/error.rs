use std::{fmt, io, path::PathBuf, process::ExitStatus};

// Messages never repeat their `#[source]`; callers print the whole chain.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GotestError {
    #[error("walking package tree")]
    Walk(#[from] walkdir::Error),
    #[error("io error at {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{tool} not found")]
    ToolNotFound {
        tool: String,
        #[source]
        source: which::Error,
    },
    #[error("running {command}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("{command} failed with {status}")]
    CommandFailed { command: String, status: ExitStatus },
    #[error("coverage profile not generated at {}", .0.display())]
    ProfileMissing(PathBuf),
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type GotestResult<T> = Result<T, GotestError>;

impl GotestError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn spawn(command: impl fmt::Display, source: io::Error) -> Self {
        Self::Spawn {
            command: command.to_string(),
            source,
        }
    }

    pub fn command_failed(command: impl fmt::Display, status: ExitStatus) -> Self {
        Self::CommandFailed {
            command: command.to_string(),
            status,
        }
    }
}
