//! Locate hot lines inside a rendered report.
//!
//! The editor marks hot lines by searching for each one in the rendered
//! report, starting where the previous match ended. Doing the same search
//! here gives byte ranges a host can highlight directly, and lets the CLI
//! print a marked-up report.

use log::warn;
use std::ops::Range;

/// Marker printed in front of report lines that contain a hot line.
pub const HOT_MARKER: &str = "▲ ";
const COLD_MARKER: &str = "  ";

/// Byte ranges of `hot_lines` within `report`, in order.
///
/// Each search starts at the end of the previous match, so repeated texts
/// map to successive occurrences. A line that cannot be found is skipped.
#[must_use]
pub fn locate_hot_lines<S: AsRef<str>>(report: &str, hot_lines: &[S]) -> Vec<Range<usize>> {
    let mut ranges = Vec::with_capacity(hot_lines.len());
    let mut from = 0;
    for line in hot_lines {
        let line = line.as_ref();
        match report[from..].find(line) {
            Some(offset) => {
                let start = from + offset;
                let end = start + line.len();
                ranges.push(start..end);
                from = end;
            }
            None => warn!("Hot line not found in report: {line:?}"),
        }
    }
    ranges
}

/// Prefix every report line with [`HOT_MARKER`] if it overlaps one of
/// `ranges`, or with blank padding otherwise.
#[must_use]
pub fn annotate_report(report: &str, ranges: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(report.len() + report.len() / 16);
    let mut offset = 0;
    for (idx, line) in report.split('\n').enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        let span = offset..offset + line.len();
        let hot = ranges.iter().any(|r| r.start < span.end && span.start < r.end);
        out.push_str(if hot { HOT_MARKER } else { COLD_MARKER });
        out.push_str(line);
        offset = span.end + 1;
    }
    out
}
