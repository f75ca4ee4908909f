//! Pressure-temperature path driving.
//!
//! A [`PathDriver`] runs an [`EquilibriumSolver`] once per PT point, parses
//! each transcript into a [`StepResult`] and records it in a
//! [`StateHistory`]. A ruled path also rewrites the bulk composition between
//! steps according to a [`Command`].
//!
//! # Example
//!
//! ```rust
//! use theriak_path::core::{AssemblageTarget, BulkComposition, Command};
//! use theriak_path::driver::PathDriver;
//! use theriak_path::session::{EquilibriumSolver, SessionError};
//!
//! struct NoPhases;
//!
//! impl EquilibriumSolver for NoPhases {
//!     fn run_step(&mut self, _: &BulkComposition, _: i32, _: i32) -> Result<String, SessionError> {
//!         Ok(String::from("exit THERIAK\n"))
//!     }
//! }
//!
//! let mut driver = PathDriver::new(NoPhases);
//! let bulk: BulkComposition = "SI(1)AL(1)O(?)".parse().unwrap();
//! let command: Command = "remove_sol LIQ_ 90".parse().unwrap();
//!
//! let history = driver
//!     .compute_ruled_path(&[5000, 6000], &[600, 650], &bulk, &command, AssemblageTarget::Fluids)
//!     .unwrap();
//! assert_eq!(history.len(), 2);
//! ```

mod bisect;
mod error;

pub use bisect::bisect_onset;
pub use error::PathError;

use crate::core::{
    ledger, AssemblageTarget, BulkComposition, Command, PhaseRecord, Pressure, StateHistory,
    StepResult, Temperature,
};
use crate::parser::OutputParser;
use crate::session::EquilibriumSolver;

/// Sequences solver steps along PT paths.
pub struct PathDriver<S> {
    solver: S,
    parser: OutputParser,
}

impl<S: EquilibriumSolver> PathDriver<S> {
    /// Driver with the default transcript layout.
    pub fn new(solver: S) -> Self {
        Self::with_parser(solver, OutputParser::default())
    }

    pub fn with_parser(solver: S, parser: OutputParser) -> Self {
        Self { solver, parser }
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    pub fn solver_mut(&mut self) -> &mut S {
        &mut self.solver
    }

    pub fn into_solver(self) -> S {
        self.solver
    }

    /// Run one step and parse its transcript.
    pub fn compute_step(
        &mut self,
        index: usize,
        bulk: &BulkComposition,
        temperature: Temperature,
        pressure: Pressure,
    ) -> Result<StepResult, PathError> {
        let transcript = self.solver.run_step(bulk, temperature, pressure)?;
        let output = self.parser.parse(&transcript);
        let step = StepResult::from_output(index, pressure, temperature, &output);
        tracing::info!(
            index,
            temperature,
            pressure,
            phases = ?step.phase_names(),
            "step computed"
        );
        Ok(step)
    }

    /// One step per PT point, each with its own bulk composition.
    ///
    /// All three sequences must have the same length; this is checked before
    /// the solver runs.
    pub fn compute_path(
        &mut self,
        pressures: &[Pressure],
        temperatures: &[Temperature],
        bulks: &[BulkComposition],
    ) -> Result<StateHistory, PathError> {
        check_lengths(pressures, temperatures)?;
        if bulks.len() != pressures.len() {
            return Err(PathError::BulkCountMismatch {
                steps: pressures.len(),
                bulks: bulks.len(),
            });
        }

        let mut history = StateHistory::new();
        for (index, ((pressure, temperature), bulk)) in
            pressures.iter().zip(temperatures).zip(bulks).enumerate()
        {
            let step = self.compute_step(index, bulk, *temperature, *pressure)?;
            history = history.record(step);
        }
        Ok(history)
    }

    /// PT path where `command` rewrites the bulk after every step.
    ///
    /// After each step the first phase of `target` whose name starts with the
    /// command prefix is added to or removed from the solver's reported bulk,
    /// scaled by the command percent. When no such phase is stable the bulk is
    /// carried over unchanged.
    pub fn compute_ruled_path(
        &mut self,
        pressures: &[Pressure],
        temperatures: &[Temperature],
        initial_bulk: &BulkComposition,
        command: &Command,
        target: AssemblageTarget,
    ) -> Result<StateHistory, PathError> {
        check_lengths(pressures, temperatures)?;

        let mut history = StateHistory::new();
        let mut bulk = initial_bulk.clone();
        for (index, (pressure, temperature)) in pressures.iter().zip(temperatures).enumerate() {
            let step = self.compute_step(index, &bulk, *temperature, *pressure)?;

            match step.find_by_prefix(target, command.prefix()) {
                Some(phase) => {
                    let moles = ledger::adjust_moles(
                        &step.bulk_composition_moles,
                        &phase.composition_moles,
                        command.signed_ratio(),
                    );
                    bulk = BulkComposition::from_vector(&step.element_list, &moles);
                    tracing::info!(%command, phase = %phase.name, bulk = %bulk, "bulk updated");
                }
                None => {
                    tracing::warn!(
                        %command,
                        temperature,
                        pressure,
                        "phase not stable, bulk unchanged"
                    );
                }
            }

            history = history.record(step);
        }
        Ok(history)
    }

    /// [`compute_ruled_path`](Self::compute_ruled_path) with the command in
    /// its text form (`remove_sol LIQ_ 90`).
    ///
    /// The command is parsed before the solver runs.
    pub fn compute_scripted_path(
        &mut self,
        pressures: &[Pressure],
        temperatures: &[Temperature],
        initial_bulk: &BulkComposition,
        command: &str,
        target: AssemblageTarget,
    ) -> Result<StateHistory, PathError> {
        let command: Command = command.parse()?;
        self.compute_ruled_path(pressures, temperatures, initial_bulk, &command, target)
    }

    /// Total phase volume in ccm at one PT point.
    pub fn rock_volume(
        &mut self,
        bulk: &BulkComposition,
        temperature: Temperature,
        pressure: Pressure,
        include_fluids: bool,
    ) -> Result<f64, PathError> {
        let step = self.compute_step(0, bulk, temperature, pressure)?;
        Ok(step.rock_volume(include_fluids))
    }

    /// The fluid named exactly `name` at one PT point, if stable.
    pub fn fluid(
        &mut self,
        bulk: &BulkComposition,
        temperature: Temperature,
        pressure: Pressure,
        name: &str,
    ) -> Result<Option<PhaseRecord>, PathError> {
        let step = self.compute_step(0, bulk, temperature, pressure)?;
        Ok(step.fluid(name).cloned())
    }
}

fn check_lengths(pressures: &[Pressure], temperatures: &[Temperature]) -> Result<(), PathError> {
    if pressures.len() == temperatures.len() {
        Ok(())
    } else {
        Err(PathError::LengthMismatch {
            pressures: pressures.len(),
            temperatures: temperatures.len(),
        })
    }
}
