//! Temperature bisection for a phase's stability onset.

use super::error::PathError;
use super::PathDriver;
use crate::core::{BulkComposition, Pressure, Temperature};
use crate::enforcement::{check_bisection, into_result};
use crate::session::EquilibriumSolver;

/// Bisect `[t_min, t_max]` on integer midpoints until the bracket is no wider
/// than `tolerance`.
///
/// `present(t)` reports whether the phase is stable at `t`. A stable midpoint
/// becomes the best onset and the new upper bound; otherwise it becomes the
/// new lower bound. Returns the best onset, or `t_max` if the phase was never
/// seen. Assumes stability is monotonic in temperature.
///
/// # Example
///
/// ```rust
/// use theriak_path::driver::bisect_onset;
///
/// let onset = bisect_onset(0, 1200, 1, |t| Ok::<_, ()>(t >= 600)).unwrap();
/// assert_eq!(onset, 600);
/// ```
pub fn bisect_onset<E>(
    mut t_min: Temperature,
    mut t_max: Temperature,
    tolerance: Temperature,
    mut present: impl FnMut(Temperature) -> Result<bool, E>,
) -> Result<Temperature, E> {
    let width = |lo: Temperature, hi: Temperature| i64::from(hi) - i64::from(lo);
    let mut onset = None;
    while width(t_min, t_max) > i64::from(tolerance) {
        // Lies in [t_min, t_max], so it fits back into a Temperature.
        let mid = (i64::from(t_min) + i64::from(t_max)).div_euclid(2) as Temperature;
        if present(mid)? {
            tracing::debug!(temperature = mid, "phase stable");
            onset = Some(mid);
            t_max = mid;
        } else {
            tracing::debug!(temperature = mid, "phase not stable");
            t_min = mid;
        }
    }
    Ok(onset.unwrap_or(t_max))
}

impl<S: EquilibriumSolver> PathDriver<S> {
    /// Lowest temperature, within `tolerance`, at which mineral `phase` is
    /// stable for `bulk` at `pressure`.
    ///
    /// Requires `tolerance >= 1` and `t_min <= t_max`.
    pub fn find_phase_onset_temperature(
        &mut self,
        bulk: &BulkComposition,
        pressure: Pressure,
        phase: &str,
        t_min: Temperature,
        t_max: Temperature,
        tolerance: Temperature,
    ) -> Result<Temperature, PathError> {
        into_result(check_bisection(t_min, t_max, tolerance)).map_err(PathError::InvalidBounds)?;

        let onset = bisect_onset(t_min, t_max, tolerance, |temperature| {
            let step = self.compute_step(0, bulk, temperature, pressure)?;
            Ok::<_, PathError>(step.has_mineral(phase))
        })?;
        tracing::info!(phase, pressure, onset, "stability onset");
        Ok(onset)
    }
}
