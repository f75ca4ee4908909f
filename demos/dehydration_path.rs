//! Dehydration Path
//!
//! This example heats a pelite along an isobaric path and drains 90% of the
//! melt after every step.
//!
//! Key concepts:
//! - Building a validated solver configuration
//! - Ruled paths driven by a `remove_sol` command
//! - Querying the history and archiving it for later plotting
//!
//! Needs a Theriak install. Point `THERIAK_DIR` at a directory holding
//! `THERIN` and the database, and put `theriak` on the PATH (or set
//! `THERIAK_PROGRAMS`).
//!
//! Run with: THERIAK_DIR=/path/to/run cargo run --example dehydration_path

use std::error::Error;
use std::time::Duration;
use theriak_path::builder::SolverConfigBuilder;
use theriak_path::checkpoint::{ArchiveFormat, RunArchive};
use theriak_path::core::{AssemblageTarget, BulkComposition, Command, VolumeNormalization};
use theriak_path::driver::PathDriver;
use theriak_path::report::{assign_phase_colours, StyleAssigner};
use theriak_path::session::SolverSession;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    println!("=== Dehydration Path Example ===\n");

    let working_dir = std::env::var("THERIAK_DIR").unwrap_or_else(|_| ".".to_string());
    let mut builder = SolverConfigBuilder::new()
        .working_dir(&working_dir)
        .database("JUN92d.bs")
        .settle_time(Duration::from_millis(300));
    if let Ok(programs) = std::env::var("THERIAK_PROGRAMS") {
        builder = builder.programs_dir(programs);
    }
    let config = builder.build()?;

    let bulk: BulkComposition =
        "SI(50.36)AL(30.54)FE(6.1)MG(3.8)CA(0.9)NA(1.6)K(4.8)H(20)O(?)".parse()?;
    let command: Command = "remove_sol LIQ_ 90".parse()?;

    let temperatures: Vec<i32> = (650..=850).step_by(25).collect();
    let pressures = vec![8000; temperatures.len()];

    let mut driver = PathDriver::new(SolverSession::new(config));
    let history =
        driver.compute_ruled_path(&pressures, &temperatures, &bulk, &command, AssemblageTarget::Fluids)?;

    println!("Computed {} steps\n", history.len());
    let volumes = history.phase_volumes(&VolumeNormalization::AllPhases);
    for (temperature, row) in history.temperatures().iter().zip(&volumes.rows) {
        let phases: Vec<String> = volumes
            .columns
            .iter()
            .zip(row)
            .filter(|(_, v)| **v > 0.0)
            .map(|(name, v)| format!("{name} {v:.1}%"))
            .collect();
        println!("  {temperature:>4} °C  {}", phases.join(", "));
    }

    let mut styles = StyleAssigner::new();
    assign_phase_colours(&mut styles, &history)?;
    println!("\nPhase colours:");
    for (phase, colour) in styles.assigned() {
        println!("  {phase:<16} {colour}");
    }

    let archive = RunArchive::new(format!("{command} at 8 kbar"), history);
    let path = std::path::Path::new(&working_dir).join("dehydration_path.json");
    archive.save(&path, ArchiveFormat::Json)?;
    println!("\nArchived run {} to {}", archive.id, path.display());

    Ok(())
}
