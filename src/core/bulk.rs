//! Bulk chemical compositions in the solver's `ELEMENT(value)` notation.
//!
//! A bulk composition is an ordered mapping from element symbol to molar
//! amount. Order is first-seen order, which is also the order written to the
//! solver input file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Molar amount of one element in a bulk composition.
///
/// `Unresolved` is the `?` placeholder: the solver computes the amount itself
/// (typically oxygen, through charge balance).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Amount {
    Moles(f64),
    Unresolved,
}

impl Amount {
    /// Numeric value, or `None` for the placeholder.
    pub fn moles(&self) -> Option<f64> {
        match self {
            Self::Moles(value) => Some(*value),
            Self::Unresolved => None,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Moles(value) => write!(f, "{value}"),
            Self::Unresolved => f.write_str("?"),
        }
    }
}

/// Errors raised while reading the `ELEMENT(value)` notation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BulkParseError {
    #[error("Expected an element symbol at offset {offset}")]
    MissingElement { offset: usize },

    #[error("Element '{element}' is missing its '(' at offset {offset}")]
    MissingOpenParen { element: String, offset: usize },

    #[error("Element '{element}' is missing its closing ')'")]
    MissingCloseParen { element: String },

    #[error("Element '{element}' has a non-numeric amount '{value}'")]
    InvalidAmount { element: String, value: String },

    #[error("Element '{element}' has a negative amount {value}")]
    NegativeAmount { element: String, value: f64 },
}

/// Ordered element → amount mapping.
///
/// Keys are unique; inserting an existing element replaces its amount but
/// keeps its position.
///
/// # Example
///
/// ```rust
/// use theriak_path::core::{Amount, BulkComposition};
///
/// let bulk: BulkComposition = "SI(50.36)AL(30.54)O(?)H(2)".parse().unwrap();
///
/// assert_eq!(bulk.len(), 4);
/// assert_eq!(bulk.get("AL"), Some(Amount::Moles(30.54)));
/// assert_eq!(bulk.get("O"), Some(Amount::Unresolved));
/// assert_eq!(bulk.to_string(), "SI(50.36)AL(30.54)O(?)H(2)");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkComposition {
    entries: Vec<(String, Amount)>,
}

impl BulkComposition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a composition from a mole vector aligned to an element list.
    ///
    /// Extra values or elements beyond the shorter of the two are ignored.
    pub fn from_vector<S: AsRef<str>>(elements: &[S], moles: &[f64]) -> Self {
        let mut bulk = Self::new();
        for (element, value) in elements.iter().zip(moles) {
            bulk.insert(element.as_ref(), Amount::Moles(*value));
        }
        bulk
    }

    /// Insert or replace an element's amount.
    pub fn insert(&mut self, element: &str, amount: Amount) {
        match self.entries.iter_mut().find(|(name, _)| name == element) {
            Some(entry) => entry.1 = amount,
            None => self.entries.push((element.to_string(), amount)),
        }
    }

    /// Builder-style insertion of a numeric amount.
    pub fn with(mut self, element: &str, moles: f64) -> Self {
        self.insert(element, Amount::Moles(moles));
        self
    }

    /// Builder-style insertion of a `?` placeholder.
    pub fn with_unresolved(mut self, element: &str) -> Self {
        self.insert(element, Amount::Unresolved);
        self
    }

    pub fn get(&self, element: &str) -> Option<Amount> {
        self.entries
            .iter()
            .find(|(name, _)| name == element)
            .map(|(_, amount)| *amount)
    }

    /// Numeric amount of an element; absent and unresolved both read as `None`.
    pub fn moles(&self, element: &str) -> Option<f64> {
        self.get(element).and_then(|amount| amount.moles())
    }

    pub fn contains(&self, element: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == element)
    }

    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Amount)> {
        self.entries.iter().map(|(name, amount)| (name.as_str(), *amount))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every resolved amount.
    pub fn total_moles(&self) -> f64 {
        self.entries.iter().filter_map(|(_, a)| a.moles()).sum()
    }
}

impl fmt::Display for BulkComposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (element, amount) in &self.entries {
            write!(f, "{element}({amount})")?;
        }
        Ok(())
    }
}

impl FromStr for BulkComposition {
    type Err = BulkParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bulk = Self::new();
        let text = s.trim();
        let mut offset = 0;

        while offset < text.len() {
            let rest = &text[offset..];
            let symbol_len = rest
                .find(|c: char| !c.is_ascii_alphabetic())
                .unwrap_or(rest.len());
            if symbol_len == 0 {
                return Err(BulkParseError::MissingElement { offset });
            }
            let element = rest[..symbol_len].to_ascii_uppercase();
            let after_symbol = &rest[symbol_len..];

            if !after_symbol.starts_with('(') {
                return Err(BulkParseError::MissingOpenParen {
                    element,
                    offset: offset + symbol_len,
                });
            }
            let close = after_symbol
                .find(')')
                .ok_or_else(|| BulkParseError::MissingCloseParen {
                    element: element.clone(),
                })?;
            let raw = after_symbol[1..close].trim();

            let amount = if raw == "?" {
                Amount::Unresolved
            } else {
                let value: f64 = raw
                    .parse()
                    .ok()
                    .filter(|v: &f64| v.is_finite())
                    .ok_or_else(|| BulkParseError::InvalidAmount {
                        element: element.clone(),
                        value: raw.to_string(),
                    })?;
                if value < 0.0 {
                    return Err(BulkParseError::NegativeAmount { element, value });
                }
                Amount::Moles(value)
            };

            bulk.insert(&element, amount);
            offset += symbol_len + close + 1;
        }

        Ok(bulk)
    }
}
