//! CLI argument definitions

use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "hotline",
    version,
    about = "Highlight the hot lines in a line_profiler report",
    after_help = "\
EXAMPLES:
    kernprof -lbv -o /dev/null demo.py | hotline        Read the report from stdin
    hotline report.txt --export report.json             Also write a JSON export
    hotline --settings hotline.json --print-command demo.py"
)]
pub struct Args {
    /// Profiler output to analyze ('-' or omitted reads stdin)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Standard deviations above the mean for a line to count as hot
    /// (overrides the settings file)
    #[arg(short = 'k', long, value_name = "K", allow_negative_numbers = true)]
    pub num_stddev: Option<f64>,

    /// JSON settings file (python, kernprof, pythonpath, poll timeouts, num_stddev)
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Export parsed profiles and hot lines as JSON
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Print the profiler command line for SCRIPT and exit
    #[arg(long, value_name = "SCRIPT", conflicts_with_all = ["input", "export"])]
    pub print_command: Option<PathBuf>,

    /// Print the report without hot-line markers
    #[arg(long)]
    pub plain: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Input path, or `None` when the report comes from stdin
    #[must_use]
    pub fn input_path(&self) -> Option<&Path> {
        self.input.as_deref().filter(|p| p.as_os_str() != "-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_read_stdin() {
        let args = Args::try_parse_from(["hotline"]).unwrap();
        assert!(args.input_path().is_none());
        assert!(args.num_stddev.is_none());
        assert!(!args.plain);
    }

    #[test]
    fn test_dash_means_stdin() {
        let args = Args::try_parse_from(["hotline", "-"]).unwrap();
        assert!(args.input_path().is_none());
    }

    #[test]
    fn test_num_stddev_accepts_negative() {
        let args = Args::try_parse_from(["hotline", "report.txt", "-k", "-0.5"]).unwrap();
        assert_eq!(args.num_stddev, Some(-0.5));
        assert_eq!(args.input_path(), Some(Path::new("report.txt")));
    }

    #[test]
    fn test_print_command_conflicts_with_input() {
        assert!(Args::try_parse_from(["hotline", "report.txt", "--print-command", "demo.py"]).is_err());
    }
}
