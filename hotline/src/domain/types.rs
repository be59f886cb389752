//! Domain types providing compile-time safety and self-documentation
//!
//! These wrappers keep a source line number from being mixed up with a
//! hit count or a position in the profiler's output.

use serde::Serialize;
use std::fmt;

/// Source line number (1-based) as printed in the profiler's `Line #` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LineNumber(pub u32);

impl fmt::Display for LineNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Statistics the profiler reports for one source line.
///
/// `time` is in the profiler's timer units (see the `Timer unit:` line);
/// `percent` is the line's share of the function's total time (0.0 - 100.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineStats {
    pub line_number: LineNumber,
    pub hits: u64,
    pub time: u64,
    pub per_hit: f64,
    pub percent: f64,
}

impl LineStats {
    /// Stats for a line the profiler listed without measurements
    /// (decorators, `def` lines, comments, code that never ran).
    #[must_use]
    pub fn unmeasured(line_number: LineNumber) -> Self {
        Self { line_number, hits: 0, time: 0, per_hit: 0.0, percent: 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_number_display() {
        assert_eq!(LineNumber(42).to_string(), "L42");
    }

    #[test]
    fn test_unmeasured_stats_are_zero() {
        let stats = LineStats::unmeasured(LineNumber(3));
        assert_eq!(stats.line_number, LineNumber(3));
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.time, 0);
        assert_eq!(stats.per_hit, 0.0);
        assert_eq!(stats.percent, 0.0);
    }
}
