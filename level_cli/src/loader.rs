//! Reading level plans from disk.

use anyhow::{Context, Result};
use level_assembler::LevelPlan;
use std::fs;
use std::path::{Path, PathBuf};

/// Parse a TOML level plan.
pub fn parse_plan(text: &str) -> Result<LevelPlan> {
    let plan: LevelPlan = toml::from_str(text)?;
    Ok(plan)
}

/// Read and parse the plan at `path`.
pub fn load_plan(path: &Path) -> Result<LevelPlan> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read plan {}", path.display()))?;
    parse_plan(&text).with_context(|| format!("Failed to parse plan {}", path.display()))
}

/// Where a level is written when no output path is given: next to its plan.
pub fn default_output(plan_path: &Path, plan: &LevelPlan) -> PathBuf {
    plan_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(plan.default_file_name())
}
