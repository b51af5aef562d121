//! Lawnsmith command line.
//!
//! Usage: `lawnsmith <plan.toml> [--output FILE] [--stdout] [--compact]`

mod loader;

use anyhow::{Context, Result};
use clap::Parser;
use level_assembler::{AssemblerConfig, LevelAssembler};
use level_model::Document;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "lawnsmith")]
#[command(about = "Assemble a level document from a TOML level plan")]
struct Args {
    /// Path to the level plan
    plan: PathBuf,

    /// Output file; defaults to the level name next to the plan
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Print the document to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Emit JSON without indentation
    #[arg(long)]
    compact: bool,

    /// Comment written at the top of the document
    #[arg(long)]
    comment: Option<String>,

    /// Starting sun for levels whose plan does not set one
    #[arg(long)]
    default_sun: Option<u32>,
}

impl Args {
    fn assembler_config(&self) -> AssemblerConfig {
        let mut config = AssemblerConfig::default();
        if let Some(comment) = &self.comment {
            config.comment = comment.clone();
        }
        if let Some(sun) = self.default_sun {
            config.default_starting_sun = sun;
        }
        config
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "level_assembler=info,lawnsmith=info".into()),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn render(document: &Document, compact: bool) -> Result<String> {
    let text = if compact {
        serde_json::to_string(document)?
    } else {
        document.to_json_pretty()?
    };
    Ok(text)
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let plan = loader::load_plan(&args.plan)?;
    let assembler = LevelAssembler::new(args.assembler_config());

    let mut builder = assembler
        .assemble(&plan)
        .with_context(|| format!("Failed to assemble {}", args.plan.display()))?;

    let waves = &plan.waves;
    builder.set_cadence(
        waves.flag_interval,
        waves.requested_count(),
        waves.first_wave_delay,
    );
    for (index, wave) in waves.waves.iter().enumerate() {
        builder
            .add_wave(wave)
            .with_context(|| format!("Wave {index} of {} is invalid", args.plan.display()))?;
    }
    builder
        .set_rewards(plan.reward.as_ref())
        .context("Invalid reward")?;

    let document = builder.finish();
    let text = render(&document, args.compact)?;

    if args.stdout {
        println!("{text}");
        return Ok(());
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| loader::default_output(&args.plan, &plan));
    fs::write(&output, text).with_context(|| format!("Failed to write {}", output.display()))?;
    info!(path = %output.display(), objects = document.len(), "level written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_override_config() {
        let args = Args::try_parse_from([
            "lawnsmith",
            "plans/egypt_day_4.toml",
            "--stdout",
            "--default-sun",
            "75",
            "--comment",
            "Hand tuned",
        ])
        .unwrap();

        assert!(args.stdout);
        assert!(args.output.is_none());
        let config = args.assembler_config();
        assert_eq!(config.default_starting_sun, 75);
        assert_eq!(config.comment, "Hand tuned");
        assert_eq!(config.version, 1);
    }

    #[test]
    fn test_compact_render() {
        let plan = loader::parse_plan(include_str!("../plans/egypt_day_4.toml")).unwrap();
        let document = LevelAssembler::with_defaults()
            .assemble_document(&plan)
            .unwrap();

        let compact = render(&document, true).unwrap();
        assert!(!compact.contains('\n'));
        assert!(compact.starts_with("{\"#comment\":"));
        assert!(render(&document, false).unwrap().contains('\n'));
    }
}
