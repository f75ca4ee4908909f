//! Pure domain core.
//!
//! Everything here is free of I/O:
//! - Bulk compositions and the `?` placeholder
//! - Composition arithmetic (`ledger`) and oxide tables (`oxides`)
//! - Ruled-path commands
//! - Step results and their append-only history
//! - The `State` trait used by the transcript section machines

mod bulk;
mod command;
mod history;
pub mod ledger;
pub mod oxides;
mod state;
mod step;

pub use bulk::{Amount, BulkComposition, BulkParseError};
pub use command::{Command, CommandError};
pub use history::{Members, Series, StateHistory, VolumeNormalization};
pub use ledger::LedgerError;
pub use state::State;
pub use step::{AssemblageTarget, PhaseRecord, Pressure, StepResult, Temperature};
