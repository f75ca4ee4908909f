//! Validation of solver configuration and search bounds.
//!
//! Checks use Stillwater's `Validation` type to accumulate ALL violations
//! instead of failing on the first one, so a broken configuration is reported
//! in a single pass.
//!
//! # Example
//!
//! ```rust
//! use theriak_path::enforcement::{check_bisection, into_result, ConfigViolation};
//!
//! let errors = into_result(check_bisection(800, 400, 0)).unwrap_err();
//! assert_eq!(errors.len(), 2);
//! assert!(matches!(errors[1], ConfigViolation::InvertedBounds { .. }));
//! ```

pub mod rules;
pub mod violations;

pub use rules::{check_bisection, check_config, into_result, Checked};
pub use violations::ConfigViolation;
