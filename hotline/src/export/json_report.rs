//! JSON export of parsed profiles and their hot lines.
//!
//! # Output Shape
//!
//! ```text
//! {
//!   "num_stddev": 1.0,
//!   "functions": [
//!     {
//!       "file_name": "demo.py",
//!       "func_name": "work",
//!       "total_time": "0.000351 s",
//!       "never_run": false,
//!       "threshold": 46.6,
//!       "lines": [
//!         { "line_number": 7, "hits": 100, "time": 206, "per_hit": 2.1,
//!           "percent": 58.7, "text": "...", "hot": true }
//!       ]
//!     }
//!   ]
//! }
//! ```

use serde::Serialize;
use std::io::Write;

use crate::analysis::line_statistics;
use crate::domain::{ExportError, LineNumber};
use crate::report::FunctionProfile;

#[derive(Debug, Serialize)]
struct ExportedReport<'a> {
    num_stddev: f64,
    functions: Vec<ExportedFunction<'a>>,
}

#[derive(Debug, Serialize)]
struct ExportedFunction<'a> {
    file_name: &'a str,
    func_name: &'a str,
    total_time: &'a str,
    never_run: bool,
    /// `None` for functions without body lines
    threshold: Option<f64>,
    lines: Vec<ExportedLine<'a>>,
}

#[derive(Debug, Serialize)]
struct ExportedLine<'a> {
    line_number: LineNumber,
    hits: u64,
    time: u64,
    per_hit: f64,
    percent: f64,
    text: &'a str,
    hot: bool,
}

/// JSON exporter over a borrowed set of profiles
pub struct ReportExporter<'a> {
    profiles: &'a [FunctionProfile],
    num_stddev: f64,
}

impl<'a> ReportExporter<'a> {
    #[must_use]
    pub fn new(profiles: &'a [FunctionProfile], num_stddev: f64) -> Self {
        Self { profiles, num_stddev }
    }

    fn build(&self) -> ExportedReport<'a> {
        let profiles: &'a [FunctionProfile] = self.profiles;
        let functions = profiles
            .iter()
            .map(|profile| {
                let stats = line_statistics(profile, self.num_stddev).ok();
                let lines = profile
                    .lines()
                    .iter()
                    .map(|line| ExportedLine {
                        line_number: line.stats.line_number,
                        hits: line.stats.hits,
                        time: line.stats.time,
                        per_hit: line.stats.per_hit,
                        percent: line.stats.percent,
                        text: &line.text,
                        hot: stats.is_some_and(|s| s.is_hot(line.percent())),
                    })
                    .collect();

                ExportedFunction {
                    file_name: &profile.file_name,
                    func_name: &profile.func_name,
                    total_time: &profile.total_time,
                    never_run: profile.is_never_run(),
                    threshold: stats.map(|s| s.threshold),
                    lines,
                }
            })
            .collect();

        ExportedReport { num_stddev: self.num_stddev, functions }
    }

    /// Export the report to any writer (file, stdout, buffer, etc.)
    ///
    /// # Errors
    /// Returns an [`ExportError`] if serialization or writing fails.
    pub fn export<W: Write>(&self, mut writer: W) -> Result<(), ExportError> {
        serde_json::to_writer_pretty(&mut writer, &self.build())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Number of profiles that will be exported
    #[must_use]
    pub fn function_count(&self) -> usize {
        self.profiles.len()
    }
}
