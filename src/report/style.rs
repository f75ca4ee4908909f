//! Stable colour assignment for phase labels.
//!
//! Plots of a path draw the same phase in the same colour on every figure.
//! A [`StyleAssigner`] remembers which colour each label received and hands
//! out the first unused palette entry to new labels.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Twenty categorical colours, paired dark/light.
pub const DEFAULT_PALETTE: [&str; 20] = [
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
    "#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
    "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StyleError {
    #[error("{requested} labels requested but the palette has {available} colours")]
    TooManyLabels { requested: usize, available: usize },

    #[error("palette exhausted, no colour left for {label}")]
    PaletteExhausted { label: String },

    #[error("palette is empty")]
    EmptyPalette,
}

/// Label → colour registry, passed by reference to whatever draws.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleAssigner {
    palette: Vec<String>,
    assigned: BTreeMap<String, String>,
}

impl Default for StyleAssigner {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            assigned: BTreeMap::new(),
        }
    }
}

impl StyleAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_palette<I, S>(palette: I) -> Result<Self, StyleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let palette: Vec<String> = palette.into_iter().map(Into::into).collect();
        if palette.is_empty() {
            return Err(StyleError::EmptyPalette);
        }
        Ok(Self {
            palette,
            assigned: BTreeMap::new(),
        })
    }

    /// Pin a label to a colour; later `assign` calls leave it alone.
    pub fn pin(&mut self, label: impl Into<String>, colour: impl Into<String>) {
        self.assigned.insert(label.into(), colour.into());
    }

    /// Give every label a colour, keeping colours already handed out.
    ///
    /// Fails without assigning anything when more labels are requested than
    /// the palette holds.
    pub fn assign<S: AsRef<str>>(&mut self, labels: &[S]) -> Result<(), StyleError> {
        if labels.len() > self.palette.len() {
            return Err(StyleError::TooManyLabels {
                requested: labels.len(),
                available: self.palette.len(),
            });
        }

        for label in labels {
            let label = label.as_ref();
            if self.assigned.contains_key(label) {
                continue;
            }
            let colour = self
                .palette
                .iter()
                .find(|c| !self.assigned.values().any(|used| used == *c))
                .cloned()
                .ok_or_else(|| StyleError::PaletteExhausted {
                    label: label.to_string(),
                })?;
            tracing::trace!(label, colour = %colour, "colour assigned");
            self.assigned.insert(label.to_string(), colour);
        }
        Ok(())
    }

    pub fn colour(&self, label: &str) -> Option<&str> {
        self.assigned.get(label).map(String::as_str)
    }

    pub fn assigned(&self) -> &BTreeMap<String, String> {
        &self.assigned
    }

    pub fn palette(&self) -> &[String] {
        &self.palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_take_palette_order() {
        let mut styles = StyleAssigner::new();
        styles.assign(&["quartz", "garnet"]).unwrap();

        assert_eq!(styles.colour("quartz"), Some("#1f77b4"));
        assert_eq!(styles.colour("garnet"), Some("#aec7e8"));
        assert_eq!(styles.colour("biotite"), None);
    }

    #[test]
    fn colours_are_stable_across_calls() {
        let mut styles = StyleAssigner::new();
        styles.assign(&["quartz", "garnet"]).unwrap();
        styles.assign(&["garnet", "biotite", "quartz"]).unwrap();

        assert_eq!(styles.colour("quartz"), Some("#1f77b4"));
        assert_eq!(styles.colour("garnet"), Some("#aec7e8"));
        assert_eq!(styles.colour("biotite"), Some("#ff7f0e"));
    }

    #[test]
    fn pinned_colours_are_skipped() {
        let mut styles = StyleAssigner::new();
        styles.pin("water.fluid", "#1f77b4");
        styles.assign(&["water.fluid", "quartz"]).unwrap();

        assert_eq!(styles.colour("water.fluid"), Some("#1f77b4"));
        assert_eq!(styles.colour("quartz"), Some("#aec7e8"));
    }

    #[test]
    fn too_many_labels_is_an_error() {
        let mut styles = StyleAssigner::with_palette(["red", "blue"]).unwrap();
        let err = styles.assign(&["a", "b", "c"]).unwrap_err();

        assert_eq!(
            err,
            StyleError::TooManyLabels {
                requested: 3,
                available: 2
            }
        );
        assert!(styles.assigned().is_empty());
    }

    #[test]
    fn exhausted_palette_names_the_label() {
        let mut styles = StyleAssigner::with_palette(["red", "blue"]).unwrap();
        styles.assign(&["a", "b"]).unwrap();

        assert_eq!(
            styles.assign(&["c"]),
            Err(StyleError::PaletteExhausted {
                label: "c".to_string()
            })
        );
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert_eq!(
            StyleAssigner::with_palette(Vec::<String>::new()),
            Err(StyleError::EmptyPalette)
        );
    }
}
