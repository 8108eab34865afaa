//! qsnap - Snapshot statistics over recorded shots
//! Command-line interface for accumulating and exporting snapshot statistics

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use qsnap_core::{
    qudit_count, CapturedShot, CircuitLayout, EngineConfig, SnapshotSource, VectorEngine,
    DEFAULT_EPSILON, DEFAULT_QUDIT_DIM, OUTPUT_NAMES,
};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "qsnap")]
#[command(author = "SIL Contributors")]
#[command(version = "2026.1.16")]
#[command(about = "qsnap - shot-averaged quantum state statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Accumulate a shot log and export the averaged statistics
    Run {
        /// Shot log (.json) with circuit layout and captured shots
        #[arg(value_name = "SHOTLOG")]
        input: PathBuf,

        /// Settings document (.json) selecting outputs and target states
        #[arg(short, long, value_name = "SETTINGS", env = "QSNAP_SETTINGS")]
        settings: Option<PathBuf>,

        /// Output report file (.json); stdout if omitted
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Number of independent engines accumulating disjoint shot batches
        #[arg(short, long, default_value_t = 1, env = "QSNAP_WORKERS")]
        workers: usize,

        /// Pretty-print the JSON report
        #[arg(long)]
        pretty: bool,
    },

    /// Show recognized output names and defaults
    Info,
}

/// Shot log recorded by a simulation backend
#[derive(Debug, Default, Deserialize)]
struct ShotLog {
    #[serde(default)]
    circuit: CircuitLayout,
    #[serde(default)]
    shots: Vec<CapturedShot>,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qsnap=info,qsnap_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            settings,
            output,
            workers,
            pretty,
        } => {
            if let Err(e) = run_command(&input, settings.as_deref(), output.as_deref(), workers, pretty) {
                eprintln!("{} {:#}", "error:".red().bold(), e);
                std::process::exit(1);
            }
        }

        Commands::Info => {
            print_info();
        }
    }
}

// ============================================================================
// Run command
// ============================================================================

fn load_config(settings: Option<&Path>) -> Result<EngineConfig> {
    match settings {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn load_shot_log(path: &Path) -> Result<ShotLog> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read shot log {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid shot log {}", path.display()))
}

/// Number of shots whose final state does not span the declared registers
fn layout_mismatches(log: &ShotLog, radix: u64) -> usize {
    let declared = log.circuit.qudit_count();
    if declared == 0 {
        return 0;
    }
    log.shots
        .iter()
        .map(|shot| shot.state())
        .filter(|state| !state.is_empty() && qudit_count(state.len(), radix) != declared)
        .count()
}

/// Accumulates `shots` on `workers` independent engines and merges them in order
fn accumulate(
    template: &VectorEngine,
    layout: &CircuitLayout,
    shots: &[CapturedShot],
    workers: usize,
) -> Result<VectorEngine> {
    let workers = workers.clamp(1, shots.len().max(1));
    let batch = shots.len().div_ceil(workers).max(1);

    let partials: Vec<Result<VectorEngine>> = std::thread::scope(|scope| {
        let handles: Vec<_> = shots
            .chunks(batch)
            .enumerate()
            .map(|(i, chunk)| {
                scope.spawn(move || {
                    let mut engine = template.fork();
                    for (j, shot) in chunk.iter().enumerate() {
                        engine
                            .compute_results(layout, shot)
                            .with_context(|| format!("shot {}", i * batch + j))?;
                    }
                    tracing::debug!(worker = i, shots = chunk.len(), "batch accumulated");
                    Ok(engine)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| {
                h.join()
                    .unwrap_or_else(|_| Err(anyhow::anyhow!("worker thread panicked")))
            })
            .collect()
    });

    let mut merged = template.fork();
    for partial in partials {
        merged += &partial?;
    }
    Ok(merged)
}

fn run_command(
    input: &Path,
    settings: Option<&Path>,
    output: Option<&Path>,
    workers: usize,
    pretty: bool,
) -> Result<()> {
    let config = load_config(settings)?;
    let log = load_shot_log(input)?;

    tracing::info!(
        shots = log.shots.len(),
        registers = log.circuit.qubit_registers.len(),
        workers,
        "accumulating shot log {}",
        input.display()
    );

    let mismatched = layout_mismatches(&log, config.qudit_dim);
    if mismatched > 0 {
        tracing::warn!(
            shots = mismatched,
            declared = log.circuit.qudit_count(),
            "final state width differs from the declared registers"
        );
    }

    let template = VectorEngine::with_config(config);
    let engine = accumulate(&template, &log.circuit, &log.shots, workers)?;
    let report = engine.export();
    let json = if pretty {
        report.to_json_pretty()?
    } else {
        report.to_json()?
    };

    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "{} {} ({} shots)",
                "   Created".green().bold(),
                path.display().to_string().cyan(),
                report.shots
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}

// ============================================================================
// Info command
// ============================================================================

fn print_info() {
    println!("{}", "qsnap - shot-averaged quantum state statistics".bold());
    println!("Version: 2026.1.16");
    println!();
    println!("{}", "Settings (JSON):".bold());
    println!("  {:<22} truncation threshold (default {:e})", "chop".cyan(), DEFAULT_EPSILON);
    println!("  {:<22} qudit dimension (default {})", "qudit_dim".cyan(), DEFAULT_QUDIT_DIM);
    println!("  {:<22} list of output names", "data".cyan());
    println!("  {:<22} list of complex vectors [[re, im], ...]", "target_states".cyan());
    println!("  {:<22} normalize target states (default true)", "renorm_target_states".cyan());
    println!();
    println!("{}", "Output names:".bold());
    for (name, field) in OUTPUT_NAMES {
        println!("  {:<22} -> {}", name.cyan(), field);
    }
}
