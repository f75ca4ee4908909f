//! Token grammar shared by the section machines.

/// Marker the solver prints when it stops.
pub const EXIT_MARKER: &str = "exit THERIAK";

/// Sentinel last column of the element header (charge balance).
pub const HEADER_SENTINEL: &str = "E";

/// Forward-only cursor over transcript lines.
pub struct LineCursor<'a> {
    lines: std::str::Lines<'a>,
    consumed: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            consumed: 0,
        }
    }

    pub fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.next()?;
        self.consumed += 1;
        Some(line)
    }

    /// Skip up to `count` lines; returns false if the transcript ran out.
    pub fn skip(&mut self, count: usize) -> bool {
        (0..count).all(|_| self.next_line().is_some())
    }

    /// Number of lines consumed so far.
    pub fn position(&self) -> usize {
        self.consumed
    }
}

/// Row name: the first whitespace-delimited token, if it holds a letter and
/// is neither a number nor a bracketed unit.
///
/// Dashed separators and unit lines such as `[ccm]` have no name.
pub fn name_token(line: &str) -> Option<&str> {
    let token = line.split_whitespace().next()?;
    let valid = !token.starts_with('[')
        && token.chars().any(char::is_alphabetic)
        && number_token(token).is_none();
    valid.then_some(token)
}

/// A decimal number token (`12.5`, `-0.25`, `1.5E-03`); bare integers are not numbers here.
pub fn number_token(token: &str) -> Option<f64> {
    if !token.contains('.') {
        return None;
    }
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Decimal numbers of a line, left to right, the name token excluded.
pub fn numbers(line: &str) -> Vec<f64> {
    line.split_whitespace().filter_map(number_token).collect()
}

/// Uppercase element symbols of a header line.
pub fn element_symbols(line: &str) -> Vec<String> {
    line.split_whitespace()
        .filter(|t| t.chars().all(|c| c.is_ascii_uppercase()))
        .map(str::to_string)
        .collect()
}

/// Dashed separator line (at least five dashes, nothing else).
pub fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with("-----") && trimmed.chars().all(|c| c == '-' || c.is_whitespace())
}

pub fn is_exit(line: &str) -> bool {
    line.contains(EXIT_MARKER)
}

/// `total` or `total:` aggregate row names.
pub fn is_total(name: &str) -> bool {
    matches!(name, "total" | "total:")
}
