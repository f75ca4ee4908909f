//! Transcript fixtures for unit tests.

/// Full transcript at 600 C / 5000 bar: biotite, andalusite, quartz and a water fluid.
pub const TRANSCRIPT: &str = include_str!("../../tests/fixtures/step_600c.txt");

/// Composition section whose element header and rows wrap onto a second line.
pub const WRAPPED_ELEMENTS: &str = include_str!("../../tests/fixtures/wrapped_elements.txt");

/// Same as [`TRANSCRIPT`] without the H2O section.
pub const NO_WATER: &str = include_str!("../../tests/fixtures/no_water.txt");

/// A phase to render into a synthetic transcript.
#[derive(Clone, Debug)]
pub struct FixturePhase {
    pub name: &'static str,
    pub fluid: bool,
    pub moles: f64,
    pub volume: f64,
    pub composition: Vec<f64>,
}

impl FixturePhase {
    pub fn solid(name: &'static str, volume: f64, composition: &[f64]) -> Self {
        Self {
            name,
            fluid: false,
            moles: 1.0,
            volume,
            composition: composition.to_vec(),
        }
    }

    pub fn fluid(name: &'static str, volume: f64, composition: &[f64]) -> Self {
        Self {
            fluid: true,
            ..Self::solid(name, volume, composition)
        }
    }
}

/// Render a transcript with volumes and composition sections in the
/// 2025.06 layout. `elements` excludes the trailing `E` column.
pub fn render(elements: &[&str], phases: &[FixturePhase]) -> String {
    let mut out = String::from(" THERIAK  (Version 2025.06.05)\n\n");

    out.push_str(" volumes and densities of stable phases:\n");
    out.push_str(" ---------------------------------------\n\n");
    out.push_str("  solid phases   N   volume/mol  volume[ccm]  vol%  wt/mol  wt [g]  wt [%]  density\n");
    out.push_str("                       [ccm]                          [g]                   [g/ccm]\n");
    let mut solids_volume = 0.0;
    for phase in phases.iter().filter(|p| !p.fluid) {
        solids_volume += phase.volume;
        out.push_str(&format!(
            " {:<16} {:.8} {:.6} {:.6} {:.4} {:.6} {:.6} {:.4} {:.4}\n",
            phase.name,
            phase.moles,
            phase.volume / phase.moles,
            phase.volume,
            0.0,
            100.0,
            100.0 * phase.moles,
            0.0,
            3.0
        ));
    }
    out.push_str("  ----------\n");
    out.push_str(&format!(
        "  total of solids   {:.6} {:.4} {:.6} {:.4} {:.4}\n",
        solids_volume, 100.0, 0.0, 100.0, 3.0
    ));
    out.push_str("\n  gases and fluids   N   volume/mol  volume[ccm]  wt/mol  wt [g]  density\n");
    out.push_str("                       [ccm]                      [g]             [g/ccm]\n");
    out.push_str("  ----------\n");
    for phase in phases.iter().filter(|p| p.fluid) {
        out.push_str(&format!(
            " {:<16} {:.8} {:.6} {:.6} {:.6} {:.6} {:.4}\n",
            phase.name,
            phase.moles,
            phase.volume / phase.moles,
            phase.volume,
            18.0,
            18.0 * phase.moles,
            1.0
        ));
    }
    out.push_str(" ------------------------------------------------------------\n\n");

    out.push_str(" elements in stable phases:\n");
    out.push_str(" --------------------------\n\n");
    out.push_str("                 ");
    for element in elements {
        out.push_str(&format!(" {element:>12}"));
    }
    out.push_str("            E\n");

    let mut totals = vec![0.0; elements.len()];
    for phase in phases {
        out.push_str(&format!(" {:<16}", phase.name));
        for (i, total) in totals.iter_mut().enumerate() {
            let value = phase.composition.get(i).copied().unwrap_or(0.0);
            *total += value;
            out.push_str(&format!(" {value:>12.6}"));
        }
        out.push_str(&format!(" {:>12.6}\n", 0.0));
    }
    out.push_str(" ----------\n");
    out.push_str(&format!(" {:<16}", "total:"));
    for total in &totals {
        out.push_str(&format!(" {total:>12.6}"));
    }
    out.push_str(&format!(" {:>12.6}\n\n exit THERIAK\n", 0.0));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{columns, OutputParser, RowKind};

    #[test]
    fn rendered_transcript_parses_back() {
        let text = render(
            &["SI", "AL"],
            &[
                FixturePhase::solid("A_end1", 10.0, &[1.0, 2.0]),
                FixturePhase::fluid("water.fluid", 4.0, &[0.0, 0.0]),
            ],
        );
        let parsed = OutputParser::default().parse(&text);

        assert_eq!(parsed.volumes.value("A_end1", columns::VOLUME), Some(10.0));
        assert_eq!(
            parsed.volumes.row("water.fluid").map(|r| r.kind),
            Some(RowKind::Fluid)
        );
        assert_eq!(parsed.volumes.value("water.fluid", columns::VOLUME), Some(4.0));
        assert_eq!(parsed.composition.value("A_end1", "AL"), Some(2.0));
        assert_eq!(
            parsed.composition.total().map(|r| r.numbers()),
            Some(vec![1.0, 2.0, 0.0])
        );
    }
}
