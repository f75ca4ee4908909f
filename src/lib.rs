//! Theriak-path: drive the Theriak equilibrium solver along PT paths
//!
//! The crate follows a "pure core, imperative shell" split. Composition
//! arithmetic, transcript parsing and result history are pure functions and
//! values; launching the solver and touching files is confined to the
//! `session` module.
//!
//! # Core Concepts
//!
//! - **Session**: one solver process per step behind the `EquilibriumSolver` trait
//! - **Parser**: section state machines turning a transcript into tables
//! - **Ledger**: bulk composition arithmetic (normalize, add/remove phases, oxides)
//! - **Driver**: plain and ruled paths, plus a bisection search for phase onset
//! - **History**: append-only step results with per-phase queries
//!
//! # Example
//!
//! ```rust,no_run
//! use theriak_path::builder::SolverConfigBuilder;
//! use theriak_path::core::{AssemblageTarget, BulkComposition, Command};
//! use theriak_path::driver::PathDriver;
//! use theriak_path::session::SolverSession;
//!
//! let config = SolverConfigBuilder::new()
//!     .working_dir("/data/theriak")
//!     .database("JUN92d.bs")
//!     .build()
//!     .unwrap();
//!
//! let mut driver = PathDriver::new(SolverSession::new(config));
//! let bulk: BulkComposition = "SI(50.36)AL(17.6)FE(6.1)H(20)O(?)".parse().unwrap();
//! let command: Command = "remove_sol LIQ_ 90".parse().unwrap();
//!
//! let history = driver
//!     .compute_ruled_path(&[8000, 8000], &[650, 700], &bulk, &command, AssemblageTarget::Fluids)
//!     .unwrap();
//! println!("{} steps", history.len());
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod driver;
pub mod enforcement;
pub mod parser;
pub mod report;
pub mod session;

// Re-export commonly used types
pub use builder::SolverConfigBuilder;
pub use checkpoint::RunArchive;
pub use core::{BulkComposition, Command, StateHistory, StepResult};
pub use driver::PathDriver;
pub use parser::OutputParser;
pub use session::{EquilibriumSolver, SolverConfig, SolverSession};
