//! Errors surfaced by the command-line shell.

use std::path::PathBuf;

use floorplan_core::PlanError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Usage: {0}")]
    Usage(String),
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error(transparent)]
    Plan(#[from] PlanError),
}

pub type AppResult<T> = Result<T, AppError>;
