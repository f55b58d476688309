//! Command-line argument handling and the replay pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use floorplan_core::{EditorSession, Plan, measure};

use crate::autosave::AutoSave;
use crate::error::{AppError, AppResult};
use crate::script::Script;

pub const USAGE: &str = "floorplan <script.json> [--plan <plan.json>] [--out <out.json>]";

/// What to load, replay and write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub script: PathBuf,
    pub plan: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl RunConfig {
    /// Parse arguments, excluding the program name.
    pub fn from_args<I>(args: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut script = None;
        let mut plan = None;
        let mut output = None;
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--plan" => plan = Some(PathBuf::from(next_value(&mut args, "--plan")?)),
                "--out" => output = Some(PathBuf::from(next_value(&mut args, "--out")?)),
                flag if flag.starts_with("--") => {
                    return Err(AppError::Usage(format!("unknown option {flag}\n{USAGE}")));
                }
                _ if script.is_none() => script = Some(PathBuf::from(arg)),
                _ => return Err(AppError::Usage(format!("unexpected argument {arg}\n{USAGE}"))),
            }
        }
        let script = script.ok_or_else(|| AppError::Usage(USAGE.to_string()))?;
        Ok(Self {
            script,
            plan,
            output,
        })
    }
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> AppResult<String> {
    args.next()
        .ok_or_else(|| AppError::Usage(format!("{flag} needs a value\n{USAGE}")))
}

/// Outcome of a replay.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub commits: usize,
    pub floors: usize,
    pub rooms: usize,
    /// Total room area of each floor in square meters.
    pub floor_areas_m2: Vec<f64>,
    /// Whether the output file was written.
    pub saved: bool,
    pub plan: Plan,
}

fn read(path: &Path) -> AppResult<String> {
    fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the plan and script, replay the script and save the result.
pub fn run(config: &RunConfig) -> AppResult<RunSummary> {
    let script = Script::from_json(&read(&config.script)?)?;
    let engine = script.config.clone().unwrap_or_default();
    engine.validate()?;

    let mut session = match &config.plan {
        Some(path) => {
            let plan = Plan::from_json(&read(path)?, engine.min_side)?;
            log::info!("Loaded {} floor(s) from {}", plan.len(), path.display());
            EditorSession::with_plan(plan, engine)
        }
        None => EditorSession::new(engine),
    };

    let autosave = AutoSave::new();
    session.set_commit_observer(Some(autosave.observer()));
    script.replay(&mut session);
    log::info!(
        "Replayed {} step(s), {} commit(s)",
        script.steps.len(),
        autosave.commits()
    );

    let saved = match &config.output {
        Some(path) => autosave.flush(path)?,
        None => false,
    };

    let plan = session.plan().clone();
    Ok(RunSummary {
        commits: autosave.commits(),
        floors: plan.floors.len(),
        rooms: plan.floors.iter().map(|f| f.rooms.len()).sum(),
        floor_areas_m2: plan.floors.iter().map(measure::total_area_m2).collect(),
        saved,
        plan,
    })
}
