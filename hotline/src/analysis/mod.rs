//! Analysis logic for profiling data
//!
//! This module contains pure business logic for analyzing parsed profiler
//! reports, separated from parsing and presentation.

pub mod hot_lines;

pub use hot_lines::{collect_hot_lines, hot_lines, line_statistics, LineStatistics, DEFAULT_NUM_STDDEV};
