//! # hotline - Hot-Line Detection for Python Line Profiles
//!
//! hotline reads the verbose text report of a statement-level Python
//! profiler (`kernprof -lbv`), turns it into per-function records, and
//! flags the source lines that take a disproportionate share of their
//! function's time. An editor integration runs the profiler, passes the
//! text in, and highlights the returned lines.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                Editor integration (host)                        │
//! │        runs kernprof, captures stdout, shows results            │
//! └───────────────────────┬─────────────────────────────────────────┘
//!                         │ report text
//!                         ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       hotline (This Crate)                      │
//! │                                                                 │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐         │
//! │  │   Report     │──▶│   Analysis   │──▶│  Highlight   │         │
//! │  │   Parser     │   │  (hot lines) │   │  (ranges)    │         │
//! │  └──────────────┘   └──────────────┘   └──────────────┘         │
//! │         │                                                       │
//! │         ▼                                                       │
//! │  ┌──────────────┐                                               │
//! │  │    Export    │                                               │
//! │  │ (report.json)│                                               │
//! │  └──────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`report`]: profile records, the two-mode report parser, and display
//!   rendering
//! - [`analysis`]: mean/stddev threshold and hot-line selection
//! - [`highlight`]: byte ranges of hot lines inside the rendered report
//! - [`export`]: JSON document of profiles with per-line hot flags
//! - [`config`]: profiler invocation settings for the host
//! - [`cli`]: command-line argument parsing
//! - [`domain`]: error enums and small newtypes
//!
//! ## Typical Usage
//!
//! ```
//! use hotline::analysis::{collect_hot_lines, DEFAULT_NUM_STDDEV};
//! use hotline::highlight::locate_hot_lines;
//! use hotline::report::{parse_str, render_report};
//!
//! # fn main() -> Result<(), hotline::domain::ParseError> {
//! let output = "\
//! Total time: 0.5 s
//! File: /src/demo.py
//! Function: work at line 1
//!
//! Line #      Hits         Time  Per Hit   % Time  Line Contents
//! ==============================================================
//!      2         1           10     10.0      2.0      a = 1
//!      3         1          480    480.0     96.0      b = slow()
//!      4         1           10     10.0      2.0      return a + b
//!
//! ";
//! let profiles = parse_str(output)?;
//! let hot = collect_hot_lines(&profiles, DEFAULT_NUM_STDDEV);
//! assert_eq!(hot.len(), 1);
//! assert!(hot[0].ends_with("b = slow()"));
//!
//! let report = render_report(&profiles);
//! let ranges = locate_hot_lines(&report, &hot);
//! assert_eq!(&report[ranges[0].clone()], hot[0]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Key Concepts
//!
//! - **Hot line**: a line whose time share is at least mean + k·stddev of
//!   its function's line shares
//! - **Header block**: file, function, total time, and column layout of one
//!   function's report
//! - **Body block**: the per-line statistics table under a header block

pub mod analysis;
pub mod cli;
pub mod config;
pub mod domain;
pub mod export;
pub mod highlight;
pub mod report;
