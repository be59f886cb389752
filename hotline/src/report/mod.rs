//! Profiler report model and parser
//!
//! The profiler prints one header block and one body block per profiled
//! function. [`parser`] turns that text into [`FunctionProfile`] records,
//! [`profile`] holds the record itself and renders it back for display.

pub mod parser;
pub mod profile;

pub use parser::{parse, parse_str, ReportParser};
pub use profile::{render_report, FunctionProfile, ProfiledLine, COLUMN_HEADER};
