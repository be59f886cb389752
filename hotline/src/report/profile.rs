//! Per-function profile record.
//!
//! A [`FunctionProfile`] accumulates the body lines of one function's report
//! together with running sums of their percentages, so the hot-line detector
//! can compute mean and variance without a second pass.

use crate::domain::LineStats;
use std::fmt;

/// Column header the profiler prints above each body block.
pub const COLUMN_HEADER: &str = "Line #      Hits         Time  Per Hit   % Time  Line Contents";

/// Total time the profiler reports for a function that never executed.
const NEVER_RUN_TOTAL_TIME: &str = "0 s";

/// Relative tolerance used when re-checking the running sums.
const SUM_TOLERANCE: f64 = 1e-9;

/// One body line of a function report.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfiledLine {
    /// Numeric columns parsed from the line.
    pub stats: LineStats,

    /// The profiler's line, right-trimmed, exactly as printed.
    pub text: String,
}

impl ProfiledLine {
    /// Share of the function's total time spent on this line.
    #[must_use]
    pub fn percent(&self) -> f64 {
        self.stats.percent
    }
}

/// Profiler output for one function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionProfile {
    /// Basename of the profiled source file.
    pub file_name: String,

    /// Name of the profiled function.
    pub func_name: String,

    /// Total time as printed by the profiler (e.g. `"0.0123 s"`), unparsed.
    pub total_time: String,

    lines: Vec<ProfiledLine>,
    sum_pct: f64,
    sumsq_pct: f64,
}

impl Default for FunctionProfile {
    fn default() -> Self {
        Self {
            file_name: "<file>".to_string(),
            func_name: "<func>".to_string(),
            total_time: "<time>".to_string(),
            lines: Vec::new(),
            sum_pct: 0.0,
            sumsq_pct: 0.0,
        }
    }
}

impl FunctionProfile {
    /// Create an empty profile with placeholder metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a body line and fold its percentage into the running sums.
    pub fn add_line(&mut self, stats: LineStats, text: impl Into<String>) {
        let percent = stats.percent;
        self.lines.push(ProfiledLine { stats, text: text.into() });
        self.sum_pct += percent;
        self.sumsq_pct += percent * percent;
    }

    /// Recorded body lines in source order.
    #[must_use]
    pub fn lines(&self) -> &[ProfiledLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Sum of `percent` over all recorded lines.
    #[must_use]
    pub fn sum_pct(&self) -> f64 {
        self.sum_pct
    }

    /// Sum of `percent²` over all recorded lines.
    #[must_use]
    pub fn sumsq_pct(&self) -> f64 {
        self.sumsq_pct
    }

    /// Returns true if the running sums match a fresh pass over `lines`.
    #[must_use]
    pub fn sums_consistent(&self) -> bool {
        let (sum, sumsq) = self
            .lines
            .iter()
            .fold((0.0, 0.0), |(s, sq), line| (s + line.percent(), sq + line.percent() * line.percent()));
        close_enough(sum, self.sum_pct) && close_enough(sumsq, self.sumsq_pct)
    }

    /// Returns true if the profiler reported the function as never executed.
    #[must_use]
    pub fn is_never_run(&self) -> bool {
        self.total_time == NEVER_RUN_TOTAL_TIME
    }
}

fn close_enough(a: f64, b: f64) -> bool {
    (a - b).abs() <= SUM_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

impl fmt::Display for FunctionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_never_run() {
            return write!(f, "function {} in file {} was never run", self.func_name, self.file_name);
        }

        writeln!(f, "function {} in file {} took {}", self.func_name, self.file_name, self.total_time)?;
        writeln!(f)?;
        writeln!(f, "{COLUMN_HEADER}")?;
        writeln!(f, "{}", "=".repeat(COLUMN_HEADER.len()))?;
        for (idx, line) in self.lines.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            f.write_str(&line.text)?;
        }
        Ok(())
    }
}

/// Render every profile for display, blocks separated by a blank line.
#[must_use]
pub fn render_report(profiles: &[FunctionProfile]) -> String {
    profiles.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LineNumber;

    fn stats(line: u32, percent: f64) -> LineStats {
        LineStats { line_number: LineNumber(line), hits: 1, time: 10, per_hit: 10.0, percent }
    }

    fn sample_profile() -> FunctionProfile {
        let mut profile = FunctionProfile::new();
        profile.file_name = "demo.py".to_string();
        profile.func_name = "work".to_string();
        profile.total_time = "0.5 s".to_string();
        profile.add_line(stats(4, 25.0), "     4   1   10   10.0   25.0      x = 1");
        profile.add_line(stats(5, 75.0), "     5   1   30   30.0   75.0      y = 2");
        profile
    }

    #[test]
    fn test_default_placeholders() {
        let profile = FunctionProfile::new();
        assert_eq!(profile.file_name, "<file>");
        assert_eq!(profile.func_name, "<func>");
        assert_eq!(profile.total_time, "<time>");
        assert!(profile.is_empty());
        assert_eq!(profile.sum_pct(), 0.0);
        assert_eq!(profile.sumsq_pct(), 0.0);
    }

    #[test]
    fn test_add_line_updates_running_sums() {
        let profile = sample_profile();
        assert_eq!(profile.len(), 2);
        assert!((profile.sum_pct() - 100.0).abs() < 1e-12);
        assert!((profile.sumsq_pct() - (625.0 + 5625.0)).abs() < 1e-9);
        assert!(profile.sums_consistent());
        assert_eq!(profile.lines()[1].percent(), 75.0);
    }

    #[test]
    fn test_render_separator_matches_header() {
        let rendered = sample_profile().to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "function work in file demo.py took 0.5 s");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], COLUMN_HEADER);
        assert_eq!(lines[3].len(), lines[2].len());
        assert!(lines[3].chars().all(|c| c == '='));
        assert_eq!(lines[4], "     4   1   10   10.0   25.0      x = 1");
        assert_eq!(lines[5], "     5   1   30   30.0   75.0      y = 2");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_render_never_run() {
        let mut profile = sample_profile();
        profile.total_time = "0 s".to_string();
        assert!(profile.is_never_run());
        assert_eq!(profile.to_string(), "function work in file demo.py was never run");
    }

    #[test]
    fn test_render_report_joins_with_blank_line() {
        let mut other = FunctionProfile::new();
        other.func_name = "idle".to_string();
        other.file_name = "demo.py".to_string();
        other.total_time = "0 s".to_string();

        let report = render_report(&[sample_profile(), other]);
        assert!(report.ends_with("y = 2\n\nfunction idle in file demo.py was never run"));
    }
}
