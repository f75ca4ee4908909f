//! One explicit state machine per transcript section.
//!
//! Every machine starts right after its banner line and consumes lines from
//! the shared cursor until it reaches `Done`. Offsets come from the
//! [`OutputLayout`]; row grammars come from [`super::tokens`].
//!
//! Named lines without any decimal number (column headers, unit lines) are
//! ignored inside row states.

use super::columns::{VOLUME_HEADER, WATER_HEADER};
use super::layout::OutputLayout;
use super::table::{Row, RowKind, Table};
use super::tokens::{
    element_symbols, is_exit, is_separator, is_total, name_token, numbers, LineCursor,
    HEADER_SENTINEL,
};
use crate::core::State;

/// Value slots of the volumes total row: volume, vol%, weight, wt%, density.
const VOLUME_TOTAL_SLOTS: [usize; 5] = [2, 3, 5, 6, 7];
/// Value slots of fluid rows: N, volume/mol, volume, wt/mol, weight, density.
const VOLUME_FLUID_SLOTS: [usize; 6] = [0, 1, 2, 4, 5, 7];
/// Value slots of the H2O solids total row: moles, grams, wt% of solids.
const WATER_TOTAL_SLOTS: [usize; 3] = [2, 3, 5];

const FLUIDS_PROBE: &str = "gases and fluids";
/// Lines between the fluids probe and the first fluid row when no solids block exists.
const FLUIDS_PROBE_SKIP: usize = 1;
const ELEMENTS_ROW: &str = "elements";

/// Place `values[k]` at `slots[k]`; everything else is blank.
fn spread(values: &[f64], slots: &[usize], width: usize) -> Vec<Option<f64>> {
    let mut cells = vec![None; width];
    for (value, slot) in values.iter().zip(slots) {
        if let Some(cell) = cells.get_mut(*slot) {
            *cell = Some(*value);
        }
    }
    cells
}

fn dense(values: Vec<f64>) -> Vec<Option<f64>> {
    values.into_iter().map(Some).collect()
}

/// Skip a header block, or finish the section if the transcript runs out.
fn skip_then<S: State>(cursor: &mut LineCursor<'_>, count: usize, next: S, done: S) -> S {
    if cursor.skip(count) {
        next
    } else {
        done
    }
}

fn run<S: State>(section: &str, mut state: S, mut step: impl FnMut(S) -> S) {
    while !state.is_final() {
        let next = step(state.clone());
        if next.name() != state.name() {
            tracing::trace!(section, from = state.name(), to = next.name(), "section state");
        }
        state = next;
    }
}

#[derive(Clone, Debug, PartialEq)]
enum VolumeState {
    Header { remaining: usize },
    Rows,
    TotalRow { values: Vec<f64> },
    GasHeader { remaining: usize },
    GasRows,
    Done,
}

impl State for VolumeState {
    fn name(&self) -> &str {
        match self {
            Self::Header { .. } => "HEADER",
            Self::Rows => "ROWS",
            Self::TotalRow { .. } => "TOTAL_ROW",
            Self::GasHeader { .. } => "GAS_HEADER",
            Self::GasRows => "GAS_ROWS",
            Self::Done => "DONE",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Volumes and densities: solid rows, a total, then gas/fluid rows.
pub(crate) fn read_volumes(cursor: &mut LineCursor<'_>, layout: &OutputLayout) -> Table {
    let mut table = Table::new(&VOLUME_HEADER);
    let width = VOLUME_HEADER.len() - 1;
    let start = VolumeState::Header {
        remaining: layout.volume_header_lines,
    };

    run("volumes", start, |state| match state {
        VolumeState::Header { remaining } => {
            skip_then(cursor, remaining, VolumeState::Rows, VolumeState::Done)
        }
        VolumeState::Rows => match cursor.next_line() {
            None => VolumeState::Done,
            Some(line) if is_exit(line) => VolumeState::Done,
            Some(line) => match name_token(line) {
                Some(name) if is_total(name) => VolumeState::TotalRow {
                    values: numbers(line),
                },
                Some(name) => {
                    let values = numbers(line);
                    if !values.is_empty() {
                        table.push(Row::new(name, RowKind::Solid, dense(values)));
                    }
                    VolumeState::Rows
                }
                None => VolumeState::Rows,
            },
        },
        VolumeState::TotalRow { values } => {
            table.push(Row::new(
                "Total",
                RowKind::Total,
                spread(&values, &VOLUME_TOTAL_SLOTS, width),
            ));
            VolumeState::GasHeader {
                remaining: layout.volume_gas_header_lines,
            }
        }
        VolumeState::GasHeader { remaining } => {
            skip_then(cursor, remaining, VolumeState::GasRows, VolumeState::Done)
        }
        VolumeState::GasRows => match cursor.next_line() {
            None => VolumeState::Done,
            Some(line) if is_exit(line) || is_separator(line) => VolumeState::Done,
            Some(line) => {
                if let Some(name) = name_token(line) {
                    let values = numbers(line);
                    if !values.is_empty() {
                        table.push(Row::new(
                            name,
                            RowKind::Fluid,
                            spread(&values, &VOLUME_FLUID_SLOTS, width),
                        ));
                    }
                }
                VolumeState::GasRows
            }
        },
        VolumeState::Done => VolumeState::Done,
    });

    table
}

#[derive(Clone, Debug, PartialEq)]
enum WaterState {
    Header { remaining: usize },
    Probe,
    Rows,
    TotalRow { values: Vec<f64> },
    GasHeader { remaining: usize },
    GasRows,
    Done,
}

impl State for WaterState {
    fn name(&self) -> &str {
        match self {
            Self::Header { .. } => "HEADER",
            Self::Probe => "PROBE",
            Self::Rows => "ROWS",
            Self::TotalRow { .. } => "TOTAL_ROW",
            Self::GasHeader { .. } => "GAS_HEADER",
            Self::GasRows => "GAS_ROWS",
            Self::Done => "DONE",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// H2O content: optional solid block with its total, then gas/fluid rows.
pub(crate) fn read_water(cursor: &mut LineCursor<'_>, layout: &OutputLayout) -> Table {
    let mut table = Table::new(&WATER_HEADER);
    let width = WATER_HEADER.len() - 1;
    let start = WaterState::Header {
        remaining: layout.water_header_lines,
    };

    run("water", start, |state| match state {
        WaterState::Header { remaining } => {
            skip_then(cursor, remaining, WaterState::Probe, WaterState::Done)
        }
        WaterState::Probe => match cursor.next_line() {
            None => WaterState::Done,
            Some(line) if line.contains(FLUIDS_PROBE) => WaterState::GasHeader {
                remaining: FLUIDS_PROBE_SKIP,
            },
            Some(_) => WaterState::Rows,
        },
        WaterState::Rows => match cursor.next_line() {
            None => WaterState::Done,
            Some(line) if is_exit(line) => WaterState::Done,
            Some(line) => match name_token(line) {
                Some(name) if is_total(name) => WaterState::TotalRow {
                    values: numbers(line),
                },
                Some(name) => {
                    let values = numbers(line);
                    if !values.is_empty() {
                        table.push(Row::new(name, RowKind::Solid, dense(values)));
                    }
                    WaterState::Rows
                }
                None => WaterState::Rows,
            },
        },
        WaterState::TotalRow { values } => {
            table.push(Row::new(
                "Total (solids)",
                RowKind::Total,
                spread(&values, &WATER_TOTAL_SLOTS, width),
            ));
            WaterState::GasHeader {
                remaining: layout.water_gas_header_lines,
            }
        }
        WaterState::GasHeader { remaining } => {
            skip_then(cursor, remaining, WaterState::GasRows, WaterState::Done)
        }
        WaterState::GasRows => match cursor.next_line() {
            None => WaterState::Done,
            Some(line) if is_exit(line) || is_separator(line) => WaterState::Done,
            Some(line) => match name_token(line) {
                None => WaterState::Done,
                Some(name) => {
                    let values = numbers(line);
                    if !values.is_empty() {
                        table.push(Row::new(name, RowKind::Fluid, dense(values)));
                    }
                    WaterState::GasRows
                }
            },
        },
        WaterState::Done => WaterState::Done,
    });

    table
}

#[derive(Clone, Debug, PartialEq)]
enum CompositionState {
    Header { remaining: usize },
    ElementHeader,
    Rows { wrap: usize },
    TotalRow { values: Vec<f64> },
    Done,
}

impl State for CompositionState {
    fn name(&self) -> &str {
        match self {
            Self::Header { .. } => "HEADER",
            Self::ElementHeader => "ELEMENT_HEADER",
            Self::Rows { .. } => "ROWS",
            Self::TotalRow { .. } => "TOTAL_ROW",
            Self::Done => "DONE",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Elements in stable phases, with headers and rows possibly wrapped over
/// several physical lines.
pub(crate) fn read_composition(cursor: &mut LineCursor<'_>, layout: &OutputLayout) -> Table {
    let mut table = Table::default();
    let start = CompositionState::Header {
        remaining: layout.composition_header_lines,
    };

    run("composition", start, |state| match state {
        CompositionState::Header { remaining } => skip_then(
            cursor,
            remaining,
            CompositionState::ElementHeader,
            CompositionState::Done,
        ),
        CompositionState::ElementHeader => {
            let Some(line) = cursor.next_line() else {
                return CompositionState::Done;
            };
            let mut elements = element_symbols(line);
            let mut wrap = 1;
            while elements.last().map(String::as_str) != Some(HEADER_SENTINEL)
                && wrap < layout.max_element_header_lines
            {
                let Some(next) = cursor.next_line() else {
                    break;
                };
                elements.extend(element_symbols(next));
                wrap += 1;
            }
            if elements.is_empty() {
                return CompositionState::Done;
            }

            let mut header = vec!["Phase".to_string()];
            header.extend(elements);
            table = Table::new(&header);
            CompositionState::Rows { wrap }
        }
        CompositionState::Rows { wrap } => match cursor.next_line() {
            None => CompositionState::Done,
            Some(line) if is_exit(line) => CompositionState::Done,
            Some(line) => match name_token(line) {
                None => CompositionState::Rows { wrap },
                Some(ELEMENTS_ROW) => CompositionState::Rows { wrap },
                Some(name) => {
                    let mut values = numbers(line);
                    for _ in 1..wrap {
                        if let Some(continuation) = cursor.next_line() {
                            values.extend(numbers(continuation));
                        }
                    }
                    if is_total(name) {
                        CompositionState::TotalRow { values }
                    } else {
                        if !values.is_empty() {
                            table.push(Row::new(name, RowKind::Phase, dense(values)));
                        }
                        CompositionState::Rows { wrap }
                    }
                }
            },
        },
        CompositionState::TotalRow { values } => {
            table.push(Row::new("Total", RowKind::Total, dense(values)));
            CompositionState::Done
        }
        CompositionState::Done => CompositionState::Done,
    });

    table
}
