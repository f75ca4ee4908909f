//! Solver process driving.
//!
//! A [`SolverSession`] runs one external solver process per step: it edits
//! the input file, launches the solver, answers the two start-up prompts,
//! stops the process, and returns the output file as the transcript.
//!
//! The [`EquilibriumSolver`] trait is the seam the path driver works
//! against, so paths can also be computed from canned transcripts.

mod config;
mod error;
pub mod input;
mod process;

pub use config::SolverConfig;
pub use error::SessionError;

use crate::core::{BulkComposition, Pressure, Temperature};
use chrono::Local;
use process::SolverProcess;
use std::fs;
use std::io;

/// Answer to the solver's calculation-mode prompt (no interactive mode).
pub const DECLINE_INTERACTIVE: &str = "no";

/// Format of the run stamp written into edited input files.
pub const RUN_STAMP_FORMAT: &str = "%Y_%m_%d_%H_%M_%S";

/// Anything that turns a bulk composition at one PT point into a transcript.
pub trait EquilibriumSolver {
    fn run_step(
        &mut self,
        bulk: &BulkComposition,
        temperature: Temperature,
        pressure: Pressure,
    ) -> Result<String, SessionError>;
}

impl<S: EquilibriumSolver + ?Sized> EquilibriumSolver for &mut S {
    fn run_step(
        &mut self,
        bulk: &BulkComposition,
        temperature: Temperature,
        pressure: Pressure,
    ) -> Result<String, SessionError> {
        (**self).run_step(bulk, temperature, pressure)
    }
}

/// The external Theriak solver, one process per step.
///
/// `run_step` takes `&mut self`, so one session never overlaps itself. Two
/// sessions must not share a working directory.
#[derive(Debug)]
pub struct SolverSession {
    config: SolverConfig,
    run_stamp: String,
    step: usize,
}

impl SolverSession {
    pub fn new(config: SolverConfig) -> Self {
        let run_stamp = Local::now().format(RUN_STAMP_FORMAT).to_string();
        tracing::info!(
            working_dir = ?config.working_dir,
            database = %config.database,
            executable = ?config.resolved_executable(),
            "solver session ready"
        );
        Self {
            config,
            run_stamp,
            step: 1,
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Number the next step will carry in the input file comment.
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn run_stamp(&self) -> &str {
        &self.run_stamp
    }

    fn remove_stale_output(&self) -> Result<(), SessionError> {
        let path = self.config.output_path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::RemoveStaleOutput { path, source }),
        }
    }
}

impl EquilibriumSolver for SolverSession {
    fn run_step(
        &mut self,
        bulk: &BulkComposition,
        temperature: Temperature,
        pressure: Pressure,
    ) -> Result<String, SessionError> {
        let span = tracing::info_span!("solver_step", step = self.step, temperature, pressure);
        let _entered = span.enter();
        tracing::info!(bulk = %bulk, "running solver step");

        input::write_input(
            &self.config.input_path(),
            bulk,
            temperature,
            pressure,
            &self.run_stamp,
            self.step,
        )?;
        self.remove_stale_output()?;

        let settle = self.config.settle_time();
        let mut process = SolverProcess::spawn(&self.config)?;
        process.send(&self.config.database)?;
        process.settle(settle);
        process.send(DECLINE_INTERACTIVE)?;
        process.settle(settle);
        process.shutdown();

        let output_path = self.config.output_path();
        let bytes = fs::read(&output_path).map_err(|source| SessionError::ReadOutput {
            path: output_path,
            source,
        })?;
        let transcript = String::from_utf8_lossy(&bytes).into_owned();

        self.step += 1;
        Ok(transcript)
    }
}
