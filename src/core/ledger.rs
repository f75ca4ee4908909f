//! Pure composition arithmetic.
//!
//! Every function here takes its inputs by reference and returns fresh
//! values; nothing is mutated in place. Amounts never go below zero: each
//! subtraction clamps at zero. `?` placeholders pass through untouched.

use super::bulk::{Amount, BulkComposition};
use super::oxides;
use crate::parser::{columns, Row, RowKind, Table};
use thiserror::Error;

/// Column holding the charge balance in composition tables; never an element.
pub const CHARGE_COLUMN: &str = "E";

/// Errors from composition arithmetic.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    #[error("Cannot normalize a composition whose resolved amounts sum to zero")]
    ZeroTotal,

    #[error("No oxide data for element '{element}'")]
    UnknownElement { element: String },

    #[error("Volume fraction limit {limit} must lie in [0, 1)")]
    InvalidLimit { limit: f64 },

    #[error("No end-members registered for solution '{solution}'")]
    UnknownSolution { solution: String },
}

/// Oxide name → weight (percent when normalized), in element order.
pub type OxideComposition = Vec<(String, f64)>;

/// Scale every resolved amount so they sum to 100.
///
/// # Example
///
/// ```rust
/// use theriak_path::core::{ledger, Amount, BulkComposition};
///
/// let bulk: BulkComposition = "SI(2)O(?)AL(6)".parse().unwrap();
/// let normalized = ledger::normalize_to_100(&bulk).unwrap();
///
/// assert_eq!(normalized.moles("SI"), Some(25.0));
/// assert_eq!(normalized.get("O"), Some(Amount::Unresolved));
/// assert_eq!(normalized.moles("AL"), Some(75.0));
/// ```
pub fn normalize_to_100(composition: &BulkComposition) -> Result<BulkComposition, LedgerError> {
    let total = composition.total_moles();
    if total == 0.0 {
        return Err(LedgerError::ZeroTotal);
    }
    let factor = 100.0 / total;

    let mut normalized = BulkComposition::new();
    for (element, amount) in composition.iter() {
        let scaled = match amount {
            Amount::Moles(value) => Amount::Moles(value * factor),
            Amount::Unresolved => Amount::Unresolved,
        };
        normalized.insert(element, scaled);
    }
    Ok(normalized)
}

/// Convert a molar element composition to oxide weights.
///
/// Each resolved element except oxygen contributes
/// `moles × molar_mass / element_to_oxide_ratio`. With `normalize` the result
/// is scaled to sum to 100.
pub fn to_oxide_weight_percent(
    composition: &BulkComposition,
    normalize: bool,
) -> Result<OxideComposition, LedgerError> {
    let mut oxides_out = OxideComposition::new();

    for (element, amount) in composition.iter() {
        let Some(moles) = amount.moles() else {
            continue;
        };
        if element == "O" {
            continue;
        }
        let unknown = || LedgerError::UnknownElement {
            element: element.to_string(),
        };
        let oxide = oxides::oxide_of(element).ok_or_else(unknown)?;
        let mass = oxides::molar_mass(element).ok_or_else(unknown)?;
        let ratio = oxides::oxide_ratio(element).ok_or_else(unknown)?;
        oxides_out.push((oxide.to_string(), moles * mass / ratio));
    }

    if normalize {
        let total: f64 = oxides_out.iter().map(|(_, w)| w).sum();
        if total == 0.0 {
            return Err(LedgerError::ZeroTotal);
        }
        for (_, weight) in oxides_out.iter_mut() {
            *weight = *weight / total * 100.0;
        }
    }

    Ok(oxides_out)
}

/// Subtract `proportion × delta` from `composition`, clamped at zero.
///
/// Returns the new composition and the extracted amounts. Elements absent
/// from `composition` start at zero; placeholders stay placeholders.
fn subtract_scaled(
    composition: &BulkComposition,
    delta: &[(String, f64)],
    proportion: f64,
) -> (BulkComposition, BulkComposition) {
    let mut updated = composition.clone();
    let mut extracted = BulkComposition::new();

    for (element, moles) in delta {
        let taken = proportion * moles;
        extracted.insert(element, Amount::Moles(taken));
        match composition.get(element) {
            Some(Amount::Unresolved) => {}
            current => {
                let base = current.and_then(|a| a.moles()).unwrap_or(0.0);
                updated.insert(element, Amount::Moles((base - taken).max(0.0)));
            }
        }
    }

    (updated, extracted)
}

/// Element columns of a composition row, the charge column left out.
fn element_moles(table: &Table, row: &Row) -> Vec<(String, f64)> {
    table
        .columns()
        .iter()
        .zip(&row.values)
        .filter(|(column, _)| column.as_str() != CHARGE_COLUMN)
        .map(|(column, value)| (column.clone(), value.unwrap_or(0.0)))
        .collect()
}

/// Remove `proportion` of a named phase's elemental content.
///
/// An absent phase leaves the composition unchanged and extracts nothing.
pub fn remove_phase(
    phase: &str,
    composition: &BulkComposition,
    proportion: f64,
    composition_table: &Table,
) -> (BulkComposition, BulkComposition) {
    match composition_table.row(phase) {
        Some(row) => subtract_scaled(
            composition,
            &element_moles(composition_table, row),
            proportion,
        ),
        None => (composition.clone(), BulkComposition::new()),
    }
}

/// Add `proportion` of a named phase's elemental content.
pub fn add_phase(
    phase: &str,
    composition: &BulkComposition,
    proportion: f64,
    composition_table: &Table,
) -> (BulkComposition, BulkComposition) {
    remove_phase(phase, composition, -proportion, composition_table)
}

/// Remove `proportion` of every end-member whose name starts with `prefix`.
///
/// The end-members are summed first, so the whole solution is removed in one
/// operation.
pub fn remove_solution(
    prefix: &str,
    composition: &BulkComposition,
    proportion: f64,
    composition_table: &Table,
) -> (BulkComposition, BulkComposition) {
    let mut summed: Vec<(String, f64)> = Vec::new();
    for row in composition_table.rows_with_prefix(prefix) {
        for (element, moles) in element_moles(composition_table, row) {
            match summed.iter_mut().find(|(name, _)| *name == element) {
                Some(entry) => entry.1 += moles,
                None => summed.push((element, moles)),
            }
        }
    }

    if summed.is_empty() {
        return (composition.clone(), BulkComposition::new());
    }
    subtract_scaled(composition, &summed, proportion)
}

/// Add `proportion` of every end-member whose name starts with `prefix`.
pub fn add_solution(
    prefix: &str,
    composition: &BulkComposition,
    proportion: f64,
    composition_table: &Table,
) -> (BulkComposition, BulkComposition) {
    remove_solution(prefix, composition, -proportion, composition_table)
}

/// Element-wise sum over the insertion-order union of all elements.
///
/// A placeholder wins over numeric amounts for the same element.
pub fn sum_compositions(compositions: &[&BulkComposition]) -> BulkComposition {
    let mut sum = BulkComposition::new();
    for composition in compositions {
        for (element, amount) in composition.iter() {
            let combined = match (sum.get(element), amount) {
                (Some(Amount::Unresolved), _) | (_, Amount::Unresolved) => Amount::Unresolved,
                (Some(Amount::Moles(a)), Amount::Moles(b)) => Amount::Moles(a + b),
                (None, Amount::Moles(b)) => Amount::Moles(b),
            };
            sum.insert(element, combined);
        }
    }
    sum
}

/// `minuend - subtrahend` over the minuend's elements, clamped at zero.
pub fn subtract_composition(
    minuend: &BulkComposition,
    subtrahend: &BulkComposition,
) -> BulkComposition {
    let mut result = minuend.clone();
    for (element, amount) in subtrahend.iter() {
        if let (Some(Amount::Moles(a)), Amount::Moles(b)) = (minuend.get(element), amount) {
            result.insert(element, Amount::Moles((a - b).max(0.0)));
        }
    }
    result
}

/// `base + ratio × delta` element-wise, clamped at zero.
///
/// Vectors are aligned by position; the result has the length of `base` and a
/// missing `delta` entry counts as zero.
pub fn adjust_moles(base: &[f64], delta: &[f64], ratio: f64) -> Vec<f64> {
    base.iter()
        .enumerate()
        .map(|(i, b)| (b + ratio * delta.get(i).copied().unwrap_or(0.0)).max(0.0))
        .collect()
}

/// Remove just enough of `phase` that its share of the solid volume does not
/// exceed `limit`.
///
/// Volumes come from the `volume[ccm]` column of the volumes table; the
/// aggregate total row is not counted. The composition is returned unchanged
/// when the phase is absent or already below the limit.
pub fn cap_phase_volume_fraction(
    phase: &str,
    composition: &BulkComposition,
    limit: f64,
    volume_table: &Table,
    composition_table: &Table,
) -> Result<BulkComposition, LedgerError> {
    if !(0.0..1.0).contains(&limit) {
        return Err(LedgerError::InvalidLimit { limit });
    }
    let Some(phase_volume) = volume_table.value(phase, columns::VOLUME) else {
        return Ok(composition.clone());
    };
    let Some(column) = volume_table.column_index(columns::VOLUME) else {
        return Ok(composition.clone());
    };

    let total_volume: f64 = volume_table
        .rows()
        .iter()
        .filter(|r| r.kind != RowKind::Total)
        .filter_map(|r| r.values.get(column).copied().flatten())
        .sum();
    if total_volume <= 0.0 || phase_volume <= 0.0 {
        return Ok(composition.clone());
    }

    let fraction = phase_volume / total_volume;
    if fraction <= limit {
        return Ok(composition.clone());
    }

    let others = total_volume - phase_volume;
    let extracted_volume = phase_volume - limit * others / (1.0 - limit);
    let (capped, _) = remove_phase(
        phase,
        composition,
        extracted_volume / phase_volume,
        composition_table,
    );
    Ok(capped)
}
