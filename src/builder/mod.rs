//! Builder API for solver configuration.
//!
//! This module provides a fluent builder that assembles a
//! [`SolverConfig`](crate::session::SolverConfig) and validates it before
//! handing it out.

pub mod config;
pub mod error;

pub use config::SolverConfigBuilder;
pub use error::BuildError;
