//! Floor-plan Application
//!
//! Command-line shell that replays recorded gesture scripts against an
//! editor session and saves the committed plan.

mod autosave;
mod error;
mod runner;
mod script;

pub use autosave::AutoSave;
pub use error::{AppError, AppResult};
pub use runner::{RunConfig, RunSummary, USAGE, run};
pub use script::{Script, Step};
