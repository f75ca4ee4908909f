//! Scripted bulk-composition commands for ruled paths.
//!
//! The mini-language is exactly three whitespace-separated tokens:
//! `{order} {prefix} {percent}`, with `order` one of `add_sol` or
//! `remove_sol`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const ADD_SOLUTION: &str = "add_sol";
const REMOVE_SOLUTION: &str = "remove_sol";

/// Errors raised by the strict command parser.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CommandError {
    #[error("Expected 3 tokens (order, phase prefix, percent), got {found}: {tokens:?}")]
    WrongTokenCount { found: usize, tokens: Vec<String> },

    #[error("Unknown order '{0}', expected 'add_sol' or 'remove_sol'")]
    UnknownOrder(String),

    #[error("Phase prefix '{0}' may only contain letters, digits and underscores")]
    InvalidPrefix(String),

    #[error("Percent '{0}' is not a finite number")]
    InvalidPercent(String),
}

/// A bulk perturbation applied between ruled-path steps.
///
/// `percent` is the share of the matched end-member's elemental content that
/// is added or removed. Values outside `[0, 100]` are accepted; resulting
/// amounts are clamped at zero.
///
/// # Example
///
/// ```rust
/// use theriak_path::core::Command;
///
/// let command: Command = "remove_sol LIQtc_ 95".parse().unwrap();
///
/// assert_eq!(command.prefix(), "LIQtc_");
/// assert_eq!(command.percent(), 95.0);
/// assert_eq!(command.signed_ratio(), -0.95);
/// assert!("remove_sol LIQtc_".parse::<Command>().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    AddSolution { prefix: String, percent: f64 },
    RemoveSolution { prefix: String, percent: f64 },
}

impl Command {
    pub fn prefix(&self) -> &str {
        match self {
            Self::AddSolution { prefix, .. } | Self::RemoveSolution { prefix, .. } => prefix,
        }
    }

    pub fn percent(&self) -> f64 {
        match self {
            Self::AddSolution { percent, .. } | Self::RemoveSolution { percent, .. } => *percent,
        }
    }

    /// `percent / 100`, negated for removals.
    pub fn signed_ratio(&self) -> f64 {
        let ratio = self.percent() / 100.0;
        match self {
            Self::AddSolution { .. } => ratio,
            Self::RemoveSolution { .. } => -ratio,
        }
    }

    pub fn order(&self) -> &'static str {
        match self {
            Self::AddSolution { .. } => ADD_SOLUTION,
            Self::RemoveSolution { .. } => REMOVE_SOLUTION,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.order(), self.prefix(), self.percent())
    }
}

fn is_word(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        let [order, prefix, percent] = tokens[..] else {
            return Err(CommandError::WrongTokenCount {
                found: tokens.len(),
                tokens: tokens.iter().map(|t| t.to_string()).collect(),
            });
        };

        if !is_word(prefix) {
            return Err(CommandError::InvalidPrefix(prefix.to_string()));
        }

        let value: f64 = percent
            .parse()
            .ok()
            .filter(|v: &f64| v.is_finite())
            .ok_or_else(|| CommandError::InvalidPercent(percent.to_string()))?;

        let prefix = prefix.to_string();
        match order {
            ADD_SOLUTION => Ok(Self::AddSolution {
                prefix,
                percent: value,
            }),
            REMOVE_SOLUTION => Ok(Self::RemoveSolution {
                prefix,
                percent: value,
            }),
            other => Err(CommandError::UnknownOrder(other.to_string())),
        }
    }
}
