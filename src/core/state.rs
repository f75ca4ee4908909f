//! State trait for the transcript section machines.
//!
//! Each transcript section is read by a small state machine. States are plain
//! values; the machine's loop consults them only through this trait and a
//! `match`, never through hidden flags.

use std::fmt::Debug;

/// Trait for section-machine states.
///
/// All methods are pure. States describe the current position within a
/// section: which lines are still to be skipped, which row grammar applies,
/// or that the section is complete.
///
/// # Example
///
/// ```rust
/// use theriak_path::core::State;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Reading {
///     Header { remaining: usize },
///     Rows,
///     Done,
/// }
///
/// impl State for Reading {
///     fn name(&self) -> &str {
///         match self {
///             Self::Header { .. } => "HEADER",
///             Self::Rows => "ROWS",
///             Self::Done => "DONE",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Done)
///     }
/// }
///
/// assert_eq!(Reading::Header { remaining: 4 }.name(), "HEADER");
/// assert!(Reading::Done.is_final());
/// ```
pub trait State: Clone + PartialEq + Debug + Send + Sync {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    enum TestState {
        Header,
        Rows,
        Done,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Header => "HEADER",
                Self::Rows => "ROWS",
                Self::Done => "DONE",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Done)
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Header.name(), "HEADER");
        assert_eq!(TestState::Rows.name(), "ROWS");
        assert_eq!(TestState::Done.name(), "DONE");
    }

    #[test]
    fn is_final_identifies_terminal_states() {
        assert!(!TestState::Header.is_final());
        assert!(!TestState::Rows.is_final());
        assert!(TestState::Done.is_final());
    }
}
