use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cursor_pilot::{init_logging, PilotConfig, Scenario, Simulation};
use log::info;

/// Plays a scripted encounter against the cursor pilot
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file (JSON)
    #[arg(short, long)]
    scenario: PathBuf,
    /// Pilot configuration file (JSON); defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of ticks to simulate; overrides the scenario's own count
    #[arg(short, long)]
    ticks: Option<u64>,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => PilotConfig::load(path)
            .with_context(|| format!("loading pilot config {}", path.display()))?,
        None => PilotConfig::default(),
    };
    let scenario = Scenario::load(&args.scenario)
        .with_context(|| format!("loading scenario {}", args.scenario.display()))?;
    let ticks = args.ticks.unwrap_or(scenario.ticks);

    let mut simulation = Simulation::new(scenario, config).context("preparing simulation")?;
    let records = simulation.run(ticks);
    let rolls = records.iter().filter(|record| record.output.roll.is_some()).count();
    info!(
        "finished {} ticks at {:?} after {rolls} roll(s)",
        records.len(),
        simulation.agent().position
    );
    Ok(())
}
