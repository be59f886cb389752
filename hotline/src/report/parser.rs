//! Parser for the profiler's verbose text report.
//!
//! # Input Layout
//!
//! ```text
//! Timer unit: 1e-06 s
//!
//! Total time: 0.000351 s
//! File: /home/me/demo.py
//! Function: work at line 3
//!
//! Line #      Hits         Time  Per Hit   % Time  Line Contents
//! ==============================================================
//!      3                                           @profile
//!      4                                           def work():
//!      5         1            2      2.0      0.6      total = 0
//!      6       101          143      1.4     40.7      for i in range(100):
//!      7       100          206      2.1     58.7          total += i
//!
//! ```
//!
//! The scan alternates between two modes:
//!
//! - **Header**: picks up file, function, total time, and the column where
//!   `Line Contents` starts. A `=====` rule switches to body mode.
//! - **Body**: one record per line until a blank line or a `Timer unit`
//!   marker closes the function.
//!
//! The numeric columns are located from the header line rather than from a
//! fixed offset, so differently sized reports parse the same way.

use crate::domain::{LineNumber, LineStats, ParseError};
use crate::report::profile::FunctionProfile;
use log::debug;
use std::path::is_separator;

/// Column of `Line Contents` used until a `Line #` header says otherwise.
const DEFAULT_CODE_COL: usize = 50;

const FILE_PREFIX: &str = "File:";
const FUNCTION_PREFIX: &str = "Function:";
const TOTAL_TIME_PREFIX: &str = "Total time:";
const COLUMN_HEADER_PREFIX: &str = "Line #";
const CODE_COLUMN_LABEL: &str = "Line Contents";
const RULE_PREFIX: &str = "=====";
const TIMER_UNIT_PREFIX: &str = "Timer unit";

/// Characters consumed ahead of the file path (`File: `).
const FILE_SKIP: usize = 6;
/// Characters consumed ahead of the total time (`Total time: `).
const TOTAL_TIME_SKIP: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Header,
    Body,
}

/// Incremental parser state.
///
/// Feed lines with [`ReportParser::feed`] and collect the completed profiles
/// with [`ReportParser::finish`]. Each parser is independent; nothing is
/// shared between instances.
#[derive(Debug)]
pub struct ReportParser {
    mode: Mode,
    code_col: usize,
    current: FunctionProfile,
    finished: Vec<FunctionProfile>,
    position: usize,
}

impl Default for ReportParser {
    fn default() -> Self {
        Self {
            mode: Mode::Header,
            code_col: DEFAULT_CODE_COL,
            current: FunctionProfile::new(),
            finished: Vec::new(),
            position: 0,
        }
    }
}

impl ReportParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process the next line of profiler output.
    ///
    /// # Errors
    /// Returns a [`ParseError`] naming the line if a header or a body line
    /// is malformed.
    pub fn feed(&mut self, line: &str) -> Result<(), ParseError> {
        self.position += 1;
        match self.mode {
            Mode::Header => self.feed_header(line),
            Mode::Body => self.feed_body(line),
        }
    }

    /// Return the completed profiles in input order.
    ///
    /// A function block that was never closed by a blank line or a
    /// `Timer unit` marker is not included.
    #[must_use]
    pub fn finish(self) -> Vec<FunctionProfile> {
        if self.mode == Mode::Body {
            debug!(
                "Dropping unterminated block for function {} ({} lines)",
                self.current.func_name,
                self.current.len()
            );
        }
        self.finished
    }

    fn feed_header(&mut self, line: &str) -> Result<(), ParseError> {
        if line.starts_with(FILE_PREFIX) {
            self.current.file_name = basename(skip_chars(line, FILE_SKIP)).to_string();
        } else if line.starts_with(FUNCTION_PREFIX) {
            let name = line
                .split_whitespace()
                .nth(1)
                .ok_or_else(|| ParseError::MissingFunctionName { position: self.position, content: line.to_string() })?;
            self.current.func_name = name.to_string();
        } else if line.starts_with(TOTAL_TIME_PREFIX) {
            self.current.total_time = skip_chars(line, TOTAL_TIME_SKIP).to_string();
        } else if line.starts_with(COLUMN_HEADER_PREFIX) {
            let offset = line
                .find(CODE_COLUMN_LABEL)
                .ok_or_else(|| ParseError::MissingCodeColumn { position: self.position, content: line.to_string() })?;
            self.code_col = line[..offset].chars().count();
        } else if line.starts_with(RULE_PREFIX) {
            self.mode = Mode::Body;
        }
        Ok(())
    }

    fn feed_body(&mut self, line: &str) -> Result<(), ParseError> {
        if line.trim().is_empty() || line.starts_with(TIMER_UNIT_PREFIX) {
            let done = std::mem::take(&mut self.current);
            self.finished.push(done);
            self.mode = Mode::Header;
            return Ok(());
        }

        let stats = self.parse_stats(line)?;
        self.current.add_line(stats, line.trim_end());
        Ok(())
    }

    fn parse_stats(&self, line: &str) -> Result<LineStats, ParseError> {
        let fields: Vec<&str> = take_chars(line, self.code_col).split_whitespace().collect();

        let (line_field, rest) = fields
            .split_first()
            .ok_or_else(|| ParseError::MissingLineNumber { position: self.position, content: line.to_string() })?;
        let line_number = LineNumber(self.number(line, "line number", line_field)?);

        match rest {
            [] => Ok(LineStats::unmeasured(line_number)),
            [hits, time, per_hit, percent] => Ok(LineStats {
                line_number,
                hits: self.number(line, "hits", hits)?,
                time: self.number(line, "time", time)?,
                per_hit: self.number(line, "per hit", per_hit)?,
                percent: self.number(line, "percent", percent)?,
            }),
            _ => Err(ParseError::UnexpectedFieldCount {
                position: self.position,
                found: rest.len(),
                content: line.to_string(),
            }),
        }
    }

    fn number<T: std::str::FromStr>(&self, line: &str, field: &'static str, value: &str) -> Result<T, ParseError> {
        value.parse().map_err(|_| ParseError::InvalidNumber {
            position: self.position,
            field,
            value: value.to_string(),
            content: line.to_string(),
        })
    }
}

/// Parse a whole report given as individual lines.
///
/// # Errors
/// Returns the first [`ParseError`] encountered.
pub fn parse<I, S>(lines: I) -> Result<Vec<FunctionProfile>, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = ReportParser::new();
    for line in lines {
        parser.feed(line.as_ref())?;
    }
    Ok(parser.finish())
}

/// Parse a whole report given as one string.
///
/// # Errors
/// Returns the first [`ParseError`] encountered.
pub fn parse_str(text: &str) -> Result<Vec<FunctionProfile>, ParseError> {
    parse(text.lines())
}

/// Text after the first `n` characters, empty if the line is shorter.
fn skip_chars(line: &str, n: usize) -> &str {
    line.char_indices().nth(n).map_or("", |(idx, _)| &line[idx..])
}

/// The first `n` characters, or the whole line if it is shorter.
fn take_chars(line: &str, n: usize) -> &str {
    line.char_indices().nth(n).map_or(line, |(idx, _)| &line[..idx])
}

fn basename(path: &str) -> &str {
    path.rsplit(is_separator).next().unwrap_or(path)
}
