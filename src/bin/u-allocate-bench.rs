//! u-allocate-bench
//!
//! Runs allocation experiments and writes their results as CSV.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use u_allocate::allocators::Strategy;
use u_allocate::experiment::{run_experiment, ExperimentConfig, ResultLogger};

/// u-allocate-bench - cost and timing experiments for task allocators
#[derive(Parser, Debug)]
#[command(name = "u-allocate-bench")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log filter (overridden by RUST_LOG)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run an experiment
    Run {
        /// Built-in experiment (increasing, constant, timing-tasks, timing-resources)
        #[arg(long, conflicts_with = "config")]
        preset: Option<String>,

        /// TOML experiment file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Result file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only run these strategies (e.g. marin,mardec)
        #[arg(long, value_delimiter = ',')]
        strategies: Vec<Strategy>,
    },

    /// Print a built-in experiment as TOML
    Show {
        /// Preset name
        preset: String,
    },

    /// List built-in experiments
    Presets,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            preset,
            config,
            output,
            strategies,
        } => {
            let mut config = match (preset, config) {
                (Some(name), None) => preset_config(&name)?,
                (None, Some(path)) => ExperimentConfig::load(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                _ => bail!("pass either --preset or --config"),
            };
            if !strategies.is_empty() {
                config = config.with_strategies(strategies);
            }
            run(&config, output)
        }
        Commands::Show { preset } => {
            let config = preset_config(&preset)?;
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        Commands::Presets => {
            for name in ExperimentConfig::PRESETS {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn preset_config(name: &str) -> Result<ExperimentConfig> {
    ExperimentConfig::preset(name).with_context(|| {
        format!(
            "unknown preset '{name}' (expected one of: {})",
            ExperimentConfig::PRESETS.join(", ")
        )
    })
}

fn run(config: &ExperimentConfig, output: Option<PathBuf>) -> Result<()> {
    let label = config.measure.label();
    let summary = match output {
        Some(path) => {
            info!("Writing results to {}", path.display());
            let mut logger = ResultLogger::create(&path, &config.description, label)
                .with_context(|| format!("creating {}", path.display()))?;
            let summary = run_experiment(config, &mut logger)?;
            logger.finish()?;
            summary
        }
        None => {
            let stdout = BufWriter::new(io::stdout().lock());
            let mut logger = ResultLogger::new(stdout, &config.description, label)?;
            let summary = run_experiment(config, &mut logger)?;
            logger.finish()?;
            summary
        }
    };

    info!(
        rows = summary.rows,
        failures = summary.failures,
        "Experiment finished"
    );
    Ok(())
}
