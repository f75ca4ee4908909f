//! Theriak transcript parser.
//!
//! A transcript is scanned line by line. When a section banner is seen,
//! that section's state machine takes over the cursor until the section is
//! done; scanning then resumes after it. Missing sections yield empty tables.
//!
//! # Example
//!
//! ```rust
//! use theriak_path::parser::OutputParser;
//!
//! let transcript = "\
//!  elements in stable phases:
//!  --------------------------
//!
//!                  SI        O         E
//!  quartz        1.000000  2.000000  0.000000
//!  total:        1.000000  2.000000  0.000000
//!  exit THERIAK
//! ";
//!
//! let parsed = OutputParser::default().parse(transcript);
//! assert_eq!(parsed.composition.value("quartz", "O"), Some(2.0));
//! assert!(parsed.volumes.is_empty());
//! ```

mod layout;
mod sections;
mod table;
mod tokens;

#[cfg(test)]
pub(crate) mod fixtures;

pub use layout::OutputLayout;
pub use table::{Row, RowKind, Table};
pub use tokens::EXIT_MARKER;

use serde::{Deserialize, Serialize};
use tokens::LineCursor;

/// Column names of the volumes and H2O tables.
pub mod columns {
    pub const PHASE: &str = "Phase";
    pub const N: &str = "N";
    pub const VOLUME_PER_MOL: &str = "Volume/mol";
    pub const VOLUME: &str = "volume[ccm]";
    pub const VOLUME_PERCENT: &str = "vol%";
    pub const WEIGHT_PER_MOL: &str = "wt/mol";
    pub const WEIGHT_GRAMS: &str = "wt [g]";
    pub const WEIGHT_PERCENT: &str = "wt [%]";
    pub const DENSITY: &str = "density";

    pub const H2O_PFU: &str = "H2O [pfu]";
    pub const H2O_MOL: &str = "H2O [mol]";
    pub const H2O_GRAMS: &str = "H2O [g]";
    pub const WT_PERCENT_OF_PHASE: &str = "wt% of phase";
    pub const WT_PERCENT_OF_SOLIDS: &str = "wt% of solids";
    pub const WT_PERCENT_OF_H2O_SOLID: &str = "wt% of H2O.solid";

    pub const VOLUME_HEADER: [&str; 9] = [
        PHASE,
        N,
        VOLUME_PER_MOL,
        VOLUME,
        VOLUME_PERCENT,
        WEIGHT_PER_MOL,
        WEIGHT_GRAMS,
        WEIGHT_PERCENT,
        DENSITY,
    ];

    pub const WATER_HEADER: [&str; 8] = [
        PHASE,
        N,
        H2O_PFU,
        H2O_MOL,
        H2O_GRAMS,
        WT_PERCENT_OF_PHASE,
        WT_PERCENT_OF_SOLIDS,
        WT_PERCENT_OF_H2O_SOLID,
    ];
}

/// Section banners recognized in a transcript.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Banner {
    Volumes,
    Water,
    Composition,
}

impl Banner {
    pub const ALL: [Banner; 3] = [Banner::Volumes, Banner::Water, Banner::Composition];

    pub fn text(&self) -> &'static str {
        match self {
            Banner::Volumes => "volumes and densities of stable phases:",
            Banner::Water => "H2O content of stable phases:",
            Banner::Composition => "elements in stable phases:",
        }
    }

    /// Banner contained in `line`, if any.
    pub fn detect(line: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| line.contains(b.text()))
    }
}

/// The three tables extracted from one transcript.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedOutput {
    /// Volumes and densities of stable phases
    pub volumes: Table,
    /// H2O content of stable phases
    pub water: Table,
    /// Elements in stable phases, in moles
    pub composition: Table,
}

/// Transcript parser bound to one [`OutputLayout`].
#[derive(Clone, Debug, Default)]
pub struct OutputParser {
    layout: OutputLayout,
}

impl OutputParser {
    pub fn new(layout: OutputLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Extract the volumes, H2O and composition tables.
    ///
    /// Never fails: unrecognized lines are skipped and a missing section
    /// leaves its table empty.
    pub fn parse(&self, transcript: &str) -> ParsedOutput {
        let mut cursor = LineCursor::new(transcript);
        let mut parsed = ParsedOutput::default();

        while let Some(line) = cursor.next_line() {
            let Some(banner) = Banner::detect(line) else {
                continue;
            };
            let table = match banner {
                Banner::Volumes => {
                    parsed.volumes = sections::read_volumes(&mut cursor, &self.layout);
                    &parsed.volumes
                }
                Banner::Water => {
                    parsed.water = sections::read_water(&mut cursor, &self.layout);
                    &parsed.water
                }
                Banner::Composition => {
                    parsed.composition = sections::read_composition(&mut cursor, &self.layout);
                    &parsed.composition
                }
            };
            tracing::debug!(
                section = ?banner,
                rows = table.len(),
                line = cursor.position(),
                layout = %self.layout.version,
                "parsed section"
            );
        }

        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::columns::*;
    use super::fixtures::{NO_WATER, TRANSCRIPT, WRAPPED_ELEMENTS};
    use super::*;

    #[test]
    fn parses_volumes_section() {
        let parsed = OutputParser::default().parse(TRANSCRIPT);
        let volumes = &parsed.volumes;

        assert_eq!(volumes.header(), &VOLUME_HEADER);
        let names: Vec<&str> = volumes.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["BIO_ann2", "andalusite", "quartz", "Total", "water.fluid"]
        );
        assert_eq!(volumes.value("BIO_ann2", VOLUME), Some(38.58));
        assert_eq!(volumes.value("quartz", N), Some(1.0));
        assert_eq!(volumes.value("andalusite", DENSITY), Some(3.1447));
    }

    #[test]
    fn volumes_total_and_fluid_rows_are_aligned() {
        let parsed = OutputParser::default().parse(TRANSCRIPT);
        let volumes = &parsed.volumes;

        let total = volumes.total().map(|r| r.values.clone());
        assert_eq!(
            total,
            Some(vec![
                None,
                None,
                Some(87.035),
                Some(100.0),
                None,
                Some(269.07725),
                Some(100.0),
                Some(3.0916),
            ])
        );

        let fluid = volumes.row("water.fluid").map(|r| (r.kind, r.values.clone()));
        assert_eq!(
            fluid,
            Some((
                RowKind::Fluid,
                vec![
                    Some(0.4),
                    Some(19.5),
                    Some(7.8),
                    None,
                    Some(18.015),
                    Some(7.206),
                    None,
                    Some(0.9238),
                ]
            ))
        );
    }

    #[test]
    fn parses_water_section() {
        let parsed = OutputParser::default().parse(TRANSCRIPT);
        let water = &parsed.water;

        assert_eq!(water.header(), &WATER_HEADER);
        assert_eq!(water.value("BIO_ann2", H2O_MOL), Some(0.5));
        assert_eq!(water.value("Total (solids)", H2O_GRAMS), Some(9.0075));
        assert_eq!(water.value("Total (solids)", N), None);
        assert_eq!(water.value("water.fluid", WT_PERCENT_OF_PHASE), Some(100.0));
        assert_eq!(water.value("water.fluid", WT_PERCENT_OF_SOLIDS), None);
        assert_eq!(water.len(), 3);
    }

    #[test]
    fn parses_composition_section() {
        let parsed = OutputParser::default().parse(TRANSCRIPT);
        let composition = &parsed.composition;

        assert_eq!(
            composition.header(),
            &["Phase", "AL", "FE", "H", "K", "O", "SI", "E"]
        );
        assert_eq!(composition.len(), 5);
        assert_eq!(composition.value("water.fluid", "H"), Some(0.8));
        assert_eq!(
            composition.total().map(|r| r.numbers()),
            Some(vec![1.25, 0.75, 1.3, 0.25, 7.9, 2.25, 0.0])
        );
    }

    #[test]
    fn wrapped_element_header_is_joined() {
        let parsed = OutputParser::default().parse(WRAPPED_ELEMENTS);
        let composition = &parsed.composition;

        assert_eq!(composition.columns().len(), 12);
        assert_eq!(composition.columns().last().map(String::as_str), Some("E"));
        assert_eq!(composition.value("BIO_ann2", "AL"), Some(0.25));
        assert_eq!(composition.value("BIO_ann2", "SI"), Some(0.75));
        assert_eq!(composition.value("garnet", "MG"), Some(0.6));
        assert_eq!(composition.value("garnet", "O"), Some(12.0));
        assert_eq!(composition.total().map(|r| r.values.len()), Some(12));
        assert!(parsed.volumes.is_empty());
        assert!(parsed.water.is_empty());
    }

    #[test]
    fn missing_water_section_leaves_other_tables_intact() {
        let parsed = OutputParser::default().parse(NO_WATER);

        assert!(parsed.water.is_empty());
        assert_eq!(parsed.volumes.value("quartz", VOLUME), Some(22.69));
        assert_eq!(parsed.composition.value("quartz", "SI"), Some(1.0));
    }

    #[test]
    fn empty_transcript_parses_to_empty_tables() {
        assert_eq!(OutputParser::default().parse(""), ParsedOutput::default());
    }

    #[test]
    fn banner_detection() {
        assert_eq!(
            Banner::detect("  volumes and densities of stable phases:"),
            Some(Banner::Volumes)
        );
        assert_eq!(Banner::detect(" elements in stable phases:"), Some(Banner::Composition));
        assert_eq!(Banner::detect(" stable phases"), None);
    }
}
