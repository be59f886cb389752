//! Report export functionality
//!
//! This module writes parsed profiles to machine-readable formats.
//! Currently supports a JSON document with per-line hot flags.

pub mod json_report;

pub use json_report::ReportExporter;
