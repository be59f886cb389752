//! Hot-line detection for function profiles.
//!
//! A line is "hot" when its share of the function's time is at least
//! `mean + k·stddev` of all line shares in that function.
//!
//! # Data Flow
//!
//! ```text
//! FunctionProfile (sum_pct, sumsq_pct, lines)
//!     │
//!     ├──► line_statistics()  → mean, variance, threshold
//!     │
//!     └──► hot_lines()        → line texts with percent >= threshold
//! ```
//!
//! # Performance
//!
//! - `line_statistics()`: O(1), uses the profile's running sums
//! - `hot_lines()`: O(n) in the number of body lines

// Line counts are converted to f64 for the mean
#![allow(clippy::cast_precision_loss)]

use crate::domain::AnalysisError;
use crate::report::FunctionProfile;
use log::{debug, warn};

/// Number of standard deviations above the mean a line must reach.
pub const DEFAULT_NUM_STDDEV: f64 = 1.0;

/// Rounding allowance per summed line, in units of `f64::EPSILON`.
const ULPS_PER_LINE: f64 = 4.0;

/// Distribution of per-line time shares within one function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStatistics {
    /// Number of body lines the statistics cover.
    pub count: usize,

    /// Mean percent per line.
    pub mean: f64,

    /// Population variance, clamped to be non-negative.
    pub variance: f64,

    /// Square root of `variance`.
    pub stddev: f64,

    /// `mean + num_stddev * stddev`.
    pub threshold: f64,

    /// Absolute rounding allowance applied when comparing against `threshold`.
    pub slack: f64,
}

impl LineStatistics {
    /// Returns true if a line with this percent counts as hot.
    ///
    /// Nothing is hot when the threshold is not positive: every line would
    /// qualify, which says nothing useful.
    #[must_use]
    pub fn is_hot(&self, percent: f64) -> bool {
        self.threshold > 0.0 && percent >= self.threshold - self.slack
    }
}

/// Compute mean, variance and hot threshold for a profile.
///
/// # Errors
/// Returns [`AnalysisError::NoData`] if the profile has no lines.
pub fn line_statistics(profile: &FunctionProfile, num_stddev: f64) -> Result<LineStatistics, AnalysisError> {
    if profile.is_empty() {
        return Err(AnalysisError::NoData(profile.func_name.clone()));
    }

    let count = profile.len();
    let n = count as f64;
    let mean = profile.sum_pct() / n;
    // The running sums carry about n ulps of error each. Equal shares then
    // leave a variance residue of either sign around mean² · n · ε, and the
    // mean itself can land an ulp or two above the shared value.
    let relative_slack = ULPS_PER_LINE * n * f64::EPSILON;
    let raw_variance = profile.sumsq_pct() / n - mean * mean;
    let variance = if raw_variance <= relative_slack * mean * mean { 0.0 } else { raw_variance };
    let stddev = variance.sqrt();
    let threshold = mean + num_stddev * stddev;
    let slack = relative_slack * threshold.abs();

    Ok(LineStatistics { count, mean, variance, stddev, threshold, slack })
}

/// Lines of `profile` whose time share reaches the hot threshold.
///
/// Texts are returned in source order; identical texts are all kept.
///
/// # Errors
/// Returns [`AnalysisError::NoData`] if the profile has no lines.
pub fn hot_lines(profile: &FunctionProfile, num_stddev: f64) -> Result<Vec<&str>, AnalysisError> {
    let stats = line_statistics(profile, num_stddev)?;
    if stats.threshold <= 0.0 {
        return Ok(Vec::new());
    }

    debug!("threshold for {} is {:.2}% of total time", profile.func_name, stats.threshold);
    Ok(profile
        .lines()
        .iter()
        .filter(|line| stats.is_hot(line.percent()))
        .inspect(|line| debug!("{}: {} is hot at {:.1}%", profile.func_name, line.stats.line_number, line.percent()))
        .map(|line| line.text.as_str())
        .collect())
}

/// Hot lines of every profile, flattened in report order.
///
/// Profiles without lines are skipped rather than analyzed.
#[must_use]
pub fn collect_hot_lines(profiles: &[FunctionProfile], num_stddev: f64) -> Vec<String> {
    let mut all = Vec::new();
    for profile in profiles {
        match hot_lines(profile, num_stddev) {
            Ok(lines) => all.extend(lines.into_iter().map(str::to_string)),
            Err(e) => warn!("Skipping {}: {e}", profile.func_name),
        }
    }
    all
}
