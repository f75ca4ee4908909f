//! Presentation helpers for computed paths.

pub mod style;

pub use style::{StyleAssigner, StyleError, DEFAULT_PALETTE};

use crate::core::{StateHistory, VolumeNormalization};

/// Colour every phase that appears anywhere along `history`.
///
/// Labels are taken in order of first appearance.
pub fn assign_phase_colours(
    styles: &mut StyleAssigner,
    history: &StateHistory,
) -> Result<(), StyleError> {
    let series = history.phase_volumes(&VolumeNormalization::Raw);
    styles.assign(&series.columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StepResult;
    use crate::parser::fixtures::{render, FixturePhase};
    use crate::parser::OutputParser;

    #[test]
    fn every_phase_on_the_path_gets_a_colour() {
        let parser = OutputParser::default();
        let first = parser.parse(&render(
            &["SI", "AL"],
            &[FixturePhase::solid("quartz", 10.0, &[1.0, 0.0])],
        ));
        let second = parser.parse(&render(
            &["SI", "AL"],
            &[
                FixturePhase::solid("quartz", 10.0, &[1.0, 0.0]),
                FixturePhase::solid("kyanite", 5.0, &[1.0, 2.0]),
            ],
        ));
        let history = StateHistory::new()
            .record(StepResult::from_output(0, 5000, 600, &first))
            .record(StepResult::from_output(1, 5000, 650, &second));

        let mut styles = StyleAssigner::new();
        assign_phase_colours(&mut styles, &history).unwrap();

        assert_eq!(styles.assigned().len(), 2);
        assert!(styles.colour("quartz").is_some());
        assert!(styles.colour("kyanite").is_some());
    }
}
