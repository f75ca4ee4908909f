//! Solver input file editing.
//!
//! The input file is positional: leading `!` comment lines, then a
//! temperature/pressure line followed by the bulk composition line. Each step
//! rewrites those two lines in place and leaves everything else alone.

use super::error::SessionError;
use crate::core::{BulkComposition, Pressure, Temperature};
use std::fs;
use std::path::Path;

/// Lines before this index are never edited, comment or not.
const FIRST_EDITABLE_LINE: usize = 2;

/// Return `contents` with the PT and bulk lines set for one step.
///
/// The first line at index 2 or later that does not start with `!` becomes
/// the PT line and the bulk line is inserted right after it. If there is no
/// such line, both are appended.
///
/// # Example
///
/// ```rust
/// use theriak_path::core::BulkComposition;
/// use theriak_path::session::input::edit_input;
///
/// let bulk: BulkComposition = "SI(1)O(?)".parse().unwrap();
/// let edited = edit_input("! a\n! b\n 400 2000\n1  AL(1)\n", &bulk, 600, 5000, "stamp", 3);
///
/// assert_eq!(
///     edited,
///     "! a\n! b\n     600     5000\n1  SI(1)O(?)     *Edited with theriak-path stamp step 3\n1  AL(1)\n"
/// );
/// ```
pub fn edit_input(
    contents: &str,
    bulk: &BulkComposition,
    temperature: Temperature,
    pressure: Pressure,
    run_stamp: &str,
    step: usize,
) -> String {
    let pt_line = format!("     {temperature}     {pressure}");
    let bulk_line = format!("1  {bulk}     *Edited with theriak-path {run_stamp} step {step}");

    let mut lines: Vec<String> = contents.lines().map(str::to_string).collect();
    let target = lines
        .iter()
        .enumerate()
        .position(|(i, line)| i >= FIRST_EDITABLE_LINE && !line.starts_with('!'));

    match target {
        Some(index) => {
            lines[index] = pt_line;
            lines.insert(index + 1, bulk_line);
        }
        None => {
            lines.push(pt_line);
            lines.push(bulk_line);
        }
    }

    let mut edited = lines.join("\n");
    edited.push('\n');
    edited
}

/// Edit the input file at `path` in place.
pub fn write_input(
    path: &Path,
    bulk: &BulkComposition,
    temperature: Temperature,
    pressure: Pressure,
    run_stamp: &str,
    step: usize,
) -> Result<(), SessionError> {
    let contents = fs::read_to_string(path).map_err(|source| SessionError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    let edited = edit_input(&contents, bulk, temperature, pressure, run_stamp, step);
    fs::write(path, edited).map_err(|source| SessionError::WriteInput {
        path: path.to_path_buf(),
        source,
    })
}
