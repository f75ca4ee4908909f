//! Append-only record of a path computation.
//!
//! Keeps every [`StepResult`] in order together with the union of elements
//! seen so far, and answers the per-step queries reports are built from.

use super::bulk::BulkComposition;
use super::ledger::{self, LedgerError};
use super::oxides;
use super::step::{PhaseRecord, StepResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Solution name → end-member phase names.
pub type Members = BTreeMap<String, Vec<String>>;

/// How [`StateHistory::phase_volumes`] scales each step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum VolumeNormalization {
    /// Volumes in ccm as reported
    #[default]
    Raw,
    /// Percent of the summed volume of all phases
    AllPhases,
    /// Percent of the solid volume; the listed liquids are left out of the sum
    Solids { liquids: Vec<String> },
}

/// Per-step values under named columns; `rows[step][column]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl Series {
    fn with_columns(columns: Vec<String>, steps: usize) -> Self {
        let width = columns.len();
        Self {
            columns,
            rows: vec![vec![0.0; width]; steps],
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// One column across all steps.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(index).copied().unwrap_or(0.0))
                .collect(),
        )
    }

    /// Fold end-member columns into their solution column.
    ///
    /// The solution column is appended when absent; merged end-member
    /// columns are dropped.
    pub fn merge_members(&self, members: &Members) -> Self {
        let mut merged = self.clone();
        for (solution, end_members) in members {
            let present: Vec<usize> = end_members
                .iter()
                .filter_map(|m| merged.column_index(m))
                .collect();
            if present.is_empty() {
                continue;
            }

            let target = match merged.column_index(solution) {
                Some(index) => index,
                None => {
                    merged.columns.push(solution.clone());
                    merged.rows.iter_mut().for_each(|row| row.push(0.0));
                    merged.columns.len() - 1
                }
            };
            for row in merged.rows.iter_mut() {
                let sum: f64 = present.iter().map(|i| row[*i]).sum();
                row[target] += sum;
            }
            merged.drop_columns(&present);
        }
        merged
    }

    fn drop_columns(&mut self, indices: &[usize]) {
        let keep = |i: &usize| !indices.contains(i);
        self.columns = self
            .columns
            .iter()
            .enumerate()
            .filter(|(i, _)| keep(i))
            .map(|(_, c)| c.clone())
            .collect();
        for row in self.rows.iter_mut() {
            *row = row
                .iter()
                .enumerate()
                .filter(|(i, _)| keep(i))
                .map(|(_, v)| *v)
                .collect();
        }
    }
}

/// Ordered step results of one path.
///
/// `record` consumes the history and hands it back with the step appended,
/// so a history is only ever extended, never edited.
///
/// # Example
///
/// ```rust
/// use theriak_path::core::{StateHistory, StepResult};
/// use theriak_path::parser::ParsedOutput;
///
/// let step = StepResult::from_output(0, 5000, 600, &ParsedOutput::default());
/// let history = StateHistory::new().record(step);
///
/// assert_eq!(history.len(), 1);
/// assert!(history.elements().is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    steps: Vec<StepResult>,
    elements: Vec<String>,
    members: Members,
}

impl StateHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step and grow the element union with its elements.
    pub fn record(mut self, step: StepResult) -> Self {
        for element in &step.element_list {
            if !self.elements.contains(element) {
                self.elements.push(element.clone());
            }
        }
        self.steps.push(step);
        self
    }

    pub fn with_members(mut self, members: Members) -> Self {
        self.members = members;
        self
    }

    pub fn set_members(&mut self, members: Members) {
        self.members = members;
    }

    pub fn members(&self) -> &Members {
        &self.members
    }

    pub fn steps(&self) -> &[StepResult] {
        &self.steps
    }

    /// Every element seen so far, in first-seen order.
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last(&self) -> Option<&StepResult> {
        self.steps.last()
    }

    pub fn temperatures(&self) -> Vec<i32> {
        self.steps.iter().map(|s| s.temperature).collect()
    }

    pub fn pressures(&self) -> Vec<i32> {
        self.steps.iter().map(|s| s.pressure).collect()
    }

    /// Volume of every phase at every step, zero where a phase is absent.
    ///
    /// Columns are phase names in first-seen order. A step whose normalizing
    /// sum is zero stays all zeros.
    pub fn phase_volumes(&self, normalization: &VolumeNormalization) -> Series {
        let mut names: Vec<String> = Vec::new();
        for step in &self.steps {
            for phase in step.mineral_assemblage.iter().chain(&step.fluid_assemblage) {
                if !names.contains(&phase.name) {
                    names.push(phase.name.clone());
                }
            }
        }

        let mut series = Series::with_columns(names, self.steps.len());
        for (row, step) in series.rows.iter_mut().zip(&self.steps) {
            for phase in step.mineral_assemblage.iter().chain(&step.fluid_assemblage) {
                if let Some(i) = series.columns.iter().position(|c| *c == phase.name) {
                    row[i] = phase.volume_ccm;
                }
            }
        }

        let counted: Vec<bool> = match normalization {
            VolumeNormalization::Raw => return series,
            VolumeNormalization::AllPhases => vec![true; series.columns.len()],
            VolumeNormalization::Solids { liquids } => series
                .columns
                .iter()
                .map(|c| !liquids.contains(c))
                .collect(),
        };
        for row in series.rows.iter_mut() {
            let total: f64 = row
                .iter()
                .zip(&counted)
                .filter(|(_, counted)| **counted)
                .map(|(v, _)| v)
                .sum();
            if total > 0.0 {
                row.iter_mut().for_each(|v| *v = *v / total * 100.0);
            }
        }
        series
    }

    /// [`phase_volumes`](Self::phase_volumes) with end-members folded into
    /// their solutions using the membership map.
    pub fn solution_volumes(&self, normalization: &VolumeNormalization) -> Series {
        self.phase_volumes(normalization).merge_members(&self.members)
    }

    fn phase_at<'a>(step: &'a StepResult, phase: &str, include_fluids: bool) -> Option<&'a PhaseRecord> {
        step.mineral(phase)
            .or_else(|| include_fluids.then(|| step.fluid(phase)).flatten())
    }

    /// Moles of each element in `phase` per step, aligned to [`elements`](Self::elements).
    ///
    /// Steps where the phase is not stable read as zeros.
    pub fn phase_molar_composition(&self, phase: &str, include_fluids: bool) -> Series {
        let mut series = Series::with_columns(self.elements.clone(), self.steps.len());
        for (row, step) in series.rows.iter_mut().zip(&self.steps) {
            let Some(record) = Self::phase_at(step, phase, include_fluids) else {
                continue;
            };
            for (element, moles) in step.element_list.iter().zip(&record.composition_moles) {
                if let Some(i) = self.elements.iter().position(|e| e == element) {
                    row[i] = *moles;
                }
            }
        }
        series
    }

    /// Oxide weights of a mineral per step, optionally as percent.
    pub fn phase_oxide_composition(
        &self,
        phase: &str,
        normalize: bool,
    ) -> Result<Series, LedgerError> {
        self.oxide_series(&self.phase_molar_composition(phase, false), normalize)
    }

    /// Oxide weights of a whole solution per step: the molar compositions of
    /// its end-members (names containing `_`) are summed first.
    pub fn solution_oxide_composition(
        &self,
        solution: &str,
        normalize: bool,
    ) -> Result<Series, LedgerError> {
        let end_members = self
            .members
            .get(solution)
            .ok_or_else(|| LedgerError::UnknownSolution {
                solution: solution.to_string(),
            })?;

        let mut summed = Series::with_columns(self.elements.clone(), self.steps.len());
        for member in end_members.iter().filter(|m| m.contains('_')) {
            let molar = self.phase_molar_composition(member, false);
            for (total, row) in summed.rows.iter_mut().zip(&molar.rows) {
                total.iter_mut().zip(row).for_each(|(t, v)| *t += v);
            }
        }
        self.oxide_series(&summed, normalize)
    }

    /// Elements without oxide data are left out of every row.
    fn oxide_series(&self, molar: &Series, normalize: bool) -> Result<Series, LedgerError> {
        let known: Vec<usize> = (0..molar.columns.len())
            .filter(|&i| {
                let element = molar.columns[i].as_str();
                let has_data = element == "O"
                    || (oxides::oxide_of(element).is_some()
                        && oxides::molar_mass(element).is_some()
                        && oxides::oxide_ratio(element).is_some());
                if !has_data {
                    tracing::warn!(element, "no oxide data, element skipped");
                }
                has_data
            })
            .collect();
        let elements: Vec<&str> = known.iter().map(|&i| molar.columns[i].as_str()).collect();

        let mut series = Series::default();
        for row in &molar.rows {
            let moles: Vec<f64> = known.iter().map(|&i| row[i]).collect();
            let bulk = BulkComposition::from_vector(&elements, &moles);
            let mut oxides = ledger::to_oxide_weight_percent(&bulk, false)?;
            let total: f64 = oxides.iter().map(|(_, w)| w).sum();
            if normalize && total > 0.0 {
                oxides.iter_mut().for_each(|(_, w)| *w = *w / total * 100.0);
            }
            if series.columns.is_empty() {
                series.columns = oxides.iter().map(|(name, _)| name.clone()).collect();
            }
            series.rows.push(oxides.into_iter().map(|(_, w)| w).collect());
        }
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::fixtures::{render, FixturePhase};
    use crate::parser::OutputParser;
    use approx::assert_abs_diff_eq;

    fn step(index: usize, elements: &[&str], phases: &[FixturePhase]) -> StepResult {
        let output = OutputParser::default().parse(&render(elements, phases));
        StepResult::from_output(index, 5000, 500 + 10 * index as i32, &output)
    }

    fn history() -> StateHistory {
        StateHistory::new()
            .record(step(
                0,
                &["SI", "AL"],
                &[
                    FixturePhase::solid("BIO_ann", 30.0, &[1.0, 0.5]),
                    FixturePhase::solid("quartz", 10.0, &[1.0, 0.0]),
                ],
            ))
            .record(step(
                1,
                &["SI", "AL", "H"],
                &[
                    FixturePhase::solid("BIO_ann", 20.0, &[1.0, 0.5, 0.2]),
                    FixturePhase::solid("BIO_phl", 10.0, &[0.5, 0.5, 0.2]),
                    FixturePhase::fluid("water.fluid", 20.0, &[0.0, 0.0, 2.0]),
                ],
            ))
    }

    #[test]
    fn record_grows_element_union_in_order() {
        let history = history();
        assert_eq!(history.len(), 2);
        assert_eq!(history.elements(), &["SI", "AL", "H"]);
        assert_eq!(history.temperatures(), vec![500, 510]);
    }

    #[test]
    fn phase_volumes_fill_absent_phases_with_zero() {
        let series = history().phase_volumes(&VolumeNormalization::Raw);
        assert_eq!(
            series.columns,
            vec!["BIO_ann", "quartz", "BIO_phl", "water.fluid"]
        );
        assert_eq!(series.column("quartz"), Some(vec![10.0, 0.0]));
        assert_eq!(series.column("water.fluid"), Some(vec![0.0, 20.0]));
    }

    #[test]
    fn phase_volumes_normalize_to_solids() {
        let liquids = vec!["water.fluid".to_string()];
        let series = history().phase_volumes(&VolumeNormalization::Solids { liquids });
        let second = &series.rows[1];
        assert_abs_diff_eq!(second[0], 200.0 / 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(second[3], 200.0 / 3.0, epsilon = 1e-9);

        let all = history().phase_volumes(&VolumeNormalization::AllPhases);
        assert_abs_diff_eq!(all.rows[1].iter().sum::<f64>(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn solution_volumes_merge_end_members() {
        let mut members = Members::new();
        members.insert(
            "BIO".to_string(),
            vec!["BIO_ann".to_string(), "BIO_phl".to_string()],
        );
        let series = history()
            .with_members(members)
            .solution_volumes(&VolumeNormalization::Raw);

        assert_eq!(series.columns, vec!["quartz", "water.fluid", "BIO"]);
        assert_eq!(series.column("BIO"), Some(vec![30.0, 30.0]));
    }

    #[test]
    fn molar_composition_aligns_to_union() {
        let history = history();
        let series = history.phase_molar_composition("BIO_ann", false);
        assert_eq!(series.rows, vec![vec![1.0, 0.5, 0.0], vec![1.0, 0.5, 0.2]]);

        let water = history.phase_molar_composition("water.fluid", false);
        assert_eq!(water.rows[1], vec![0.0, 0.0, 0.0]);
        let water = history.phase_molar_composition("water.fluid", true);
        assert_eq!(water.rows[1], vec![0.0, 0.0, 2.0]);
    }

    #[test]
    fn oxide_composition_normalizes_present_steps() {
        let history = history();
        let series = history.phase_oxide_composition("quartz", true).unwrap();
        assert_eq!(series.columns, vec!["SiO2", "Al2O3", "H2O"]);
        assert_abs_diff_eq!(series.rows[0][0], 100.0, epsilon = 1e-9);
        assert_eq!(series.rows[1], vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn oxide_composition_skips_elements_without_oxide_data() {
        let history = StateHistory::new().record(step(
            0,
            &["SI", "XX"],
            &[FixturePhase::solid("quartz", 10.0, &[1.0, 3.0])],
        ));

        let series = history.phase_oxide_composition("quartz", true).unwrap();

        assert_eq!(series.columns, vec!["SiO2"]);
        assert_abs_diff_eq!(series.rows[0][0], 100.0, epsilon = 1e-9);
    }

    #[test]
    fn solution_oxides_need_membership() {
        let history = history();
        assert_eq!(
            history.solution_oxide_composition("BIO", true),
            Err(LedgerError::UnknownSolution {
                solution: "BIO".to_string()
            })
        );

        let mut members = Members::new();
        members.insert(
            "BIO".to_string(),
            vec!["BIO_ann".to_string(), "BIO_phl".to_string(), "bio".to_string()],
        );
        let series = history
            .with_members(members)
            .solution_oxide_composition("BIO", false)
            .unwrap();
        let si = series.column("SiO2").unwrap();
        let si_mass = 28.0855 / 0.467434921;
        assert_abs_diff_eq!(si[0], si_mass, epsilon = 1e-9);
        assert_abs_diff_eq!(si[1], 1.5 * si_mass, epsilon = 1e-9);
    }

    #[test]
    fn history_serializes_correctly() {
        let history = history();
        let json = serde_json::to_string(&history).unwrap();
        let restored: StateHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.len(), history.len());
        assert_eq!(restored.elements(), history.elements());
        assert_eq!(
            restored.steps()[1].phase_names(),
            history.steps()[1].phase_names()
        );
    }
}
