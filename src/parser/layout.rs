//! Declared transcript layouts.
//!
//! Header offsets differ between solver releases, so they are data rather
//! than constants baked into the section machines.

use serde::{Deserialize, Serialize};

/// Line offsets of one solver release's output transcript.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputLayout {
    /// Release label, for logs
    pub version: String,
    /// Lines between the volumes banner and the first solid row
    pub volume_header_lines: usize,
    /// Lines between the solid total row and the first fluid row
    pub volume_gas_header_lines: usize,
    /// Lines between the H2O banner and the solids/fluids probe line
    pub water_header_lines: usize,
    /// Lines between the solid total row and the first fluid row in the H2O section
    pub water_gas_header_lines: usize,
    /// Lines between the elements banner and the element header
    pub composition_header_lines: usize,
    /// Upper bound on physical lines of a wrapped element header
    pub max_element_header_lines: usize,
}

impl OutputLayout {
    /// Layout of the 2025.06.05 release.
    pub fn v2025_06() -> Self {
        Self {
            version: "v2025.06.05".to_string(),
            volume_header_lines: 4,
            volume_gas_header_lines: 4,
            water_header_lines: 2,
            water_gas_header_lines: 4,
            composition_header_lines: 2,
            max_element_header_lines: 2,
        }
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::v2025_06()
    }
}
