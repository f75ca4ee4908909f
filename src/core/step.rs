//! Structured results of one solver step.

use super::bulk::BulkComposition;
use super::ledger::CHARGE_COLUMN;
use crate::parser::{columns, ParsedOutput, Row, RowKind, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pressure in bar.
pub type Pressure = i32;

/// Temperature in °C.
pub type Temperature = i32;

/// Which assemblage a name lookup searches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssemblageTarget {
    Minerals,
    Fluids,
}

/// One stable phase (mineral or fluid) at one step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseRecord {
    pub name: String,
    pub moles_per_formula_unit: Option<f64>,
    pub volume_ccm: f64,
    pub weight_grams: f64,
    /// Fluids carry no weight percent.
    pub weight_percent: Option<f64>,
    pub density: f64,
    /// Moles of each element held by the phase, aligned to the step's element list.
    pub composition_moles: Vec<f64>,
}

/// Result of one PT step.
///
/// Created once per iteration and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// Position along the path, starting at 0
    pub index: usize,
    pub pressure: Pressure,
    pub temperature: Temperature,
    /// When the step was harvested
    pub recorded_at: DateTime<Utc>,
    pub mineral_assemblage: Vec<PhaseRecord>,
    pub fluid_assemblage: Vec<PhaseRecord>,
    pub element_list: Vec<String>,
    /// Bulk moles reported by the solver, aligned to `element_list`
    pub bulk_composition_moles: Vec<f64>,
    /// H2O content table as parsed
    pub water_content: Table,
}

impl StepResult {
    /// Assemble a step from parsed transcript tables.
    ///
    /// Empty tables read as "no data": no phases, no elements, zero volumes.
    pub fn from_output(
        index: usize,
        pressure: Pressure,
        temperature: Temperature,
        output: &ParsedOutput,
    ) -> Self {
        let composition = &output.composition;
        let element_columns: Vec<(usize, String)> = composition
            .columns()
            .iter()
            .enumerate()
            .filter(|(_, name)| name.as_str() != CHARGE_COLUMN)
            .map(|(i, name)| (i, name.clone()))
            .collect();

        let moles_of = |row: &Row| -> Vec<f64> {
            element_columns
                .iter()
                .map(|(i, _)| row.values.get(*i).copied().flatten().unwrap_or(0.0))
                .collect()
        };
        let phase_moles = |name: &str| -> Vec<f64> {
            composition
                .rows()
                .iter()
                .find(|r| r.kind != RowKind::Total && r.name == name)
                .map(&moles_of)
                .unwrap_or_else(|| vec![0.0; element_columns.len()])
        };

        let bulk_composition_moles = match composition.total() {
            Some(total) => moles_of(total),
            None => composition
                .rows()
                .iter()
                .map(&moles_of)
                .fold(vec![0.0; element_columns.len()], |acc, row| {
                    acc.iter().zip(row).map(|(a, b)| a + b).collect()
                }),
        };

        let volumes = &output.volumes;
        let cell = |row: &Row, column: &str| -> Option<f64> {
            volumes
                .column_index(column)
                .and_then(|i| row.values.get(i).copied().flatten())
        };
        let record = |row: &Row| PhaseRecord {
            name: row.name.clone(),
            moles_per_formula_unit: cell(row, columns::N),
            volume_ccm: cell(row, columns::VOLUME).unwrap_or(0.0),
            weight_grams: cell(row, columns::WEIGHT_GRAMS).unwrap_or(0.0),
            weight_percent: cell(row, columns::WEIGHT_PERCENT),
            density: cell(row, columns::DENSITY).unwrap_or(0.0),
            composition_moles: phase_moles(&row.name),
        };

        let assemblage = |kind: RowKind| -> Vec<PhaseRecord> {
            volumes
                .rows()
                .iter()
                .filter(|r| r.kind == kind)
                .map(&record)
                .collect()
        };

        Self {
            index,
            pressure,
            temperature,
            recorded_at: Utc::now(),
            mineral_assemblage: assemblage(RowKind::Solid),
            fluid_assemblage: assemblage(RowKind::Fluid),
            element_list: element_columns.into_iter().map(|(_, name)| name).collect(),
            bulk_composition_moles,
            water_content: output.water.clone(),
        }
    }

    pub fn assemblage(&self, target: AssemblageTarget) -> &[PhaseRecord] {
        match target {
            AssemblageTarget::Minerals => &self.mineral_assemblage,
            AssemblageTarget::Fluids => &self.fluid_assemblage,
        }
    }

    /// First phase of the target assemblage whose name starts with `prefix`.
    pub fn find_by_prefix(&self, target: AssemblageTarget, prefix: &str) -> Option<&PhaseRecord> {
        self.assemblage(target)
            .iter()
            .find(|phase| phase.name.starts_with(prefix))
    }

    pub fn mineral(&self, name: &str) -> Option<&PhaseRecord> {
        self.mineral_assemblage.iter().find(|p| p.name == name)
    }

    pub fn fluid(&self, name: &str) -> Option<&PhaseRecord> {
        self.fluid_assemblage.iter().find(|p| p.name == name)
    }

    /// Whether a mineral with exactly this name is stable.
    pub fn has_mineral(&self, name: &str) -> bool {
        self.mineral(name).is_some()
    }

    /// Names of every stable phase, minerals first.
    pub fn phase_names(&self) -> Vec<&str> {
        self.mineral_assemblage
            .iter()
            .chain(&self.fluid_assemblage)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Sum of phase volumes in ccm.
    pub fn rock_volume(&self, include_fluids: bool) -> f64 {
        let solids: f64 = self.mineral_assemblage.iter().map(|p| p.volume_ccm).sum();
        if include_fluids {
            solids + self.fluid_assemblage.iter().map(|p| p.volume_ccm).sum::<f64>()
        } else {
            solids
        }
    }

    /// The reported bulk as a composition, ready to feed the next step.
    pub fn bulk_composition(&self) -> BulkComposition {
        BulkComposition::from_vector(&self.element_list, &self.bulk_composition_moles)
    }
}
