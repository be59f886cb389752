//! # hotline - Main Entry Point
//!
//! Supports two modes:
//! - **Report** (`hotline [INPUT]`): parse profiler output from a file or
//!   stdin, print the report with hot lines marked, optionally export JSON
//! - **Command** (`--print-command SCRIPT`): print the profiler invocation
//!   the editor integration should run for SCRIPT

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Read};
use std::path::Path;

use hotline::analysis::collect_hot_lines;
use hotline::cli::Args;
use hotline::config::{shell_command_line, shell_quote, ProfilerSettings};
use hotline::export::ReportExporter;
use hotline::highlight::{annotate_report, locate_hot_lines};
use hotline::report::{parse_str, render_report};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            report_error(&e);
            code
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<clap::Error>().is_some() {
        EXIT_USAGE
    } else {
        EXIT_ERROR
    }
}

/// clap renders its own `error:` prefix and usage hint
fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<clap::Error>() {
        Some(usage) => {
            if usage.print().is_err() {
                eprintln!("{usage}");
            }
        }
        None => eprintln!("error: {err:#}"),
    }
}

fn load_settings(path: Option<&Path>) -> Result<ProfilerSettings> {
    match path {
        Some(path) => {
            let settings = ProfilerSettings::from_file(path)?;
            info!("Loaded settings from {}", path.display());
            Ok(settings)
        }
        None => Ok(ProfilerSettings::default()),
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read profiler output: {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text).context("Failed to read profiler output from stdin")?;
            Ok(text)
        }
    }
}

fn print_command(settings: &ProfilerSettings, script: &Path) {
    let argv = settings.profiler_command(script);
    println!("{}", shell_command_line(&argv));
    println!("PYTHONPATH={}", shell_quote(&settings.search_path(script.parent())));
}

fn run() -> Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => return Err(e.into()),
    };

    let settings = load_settings(args.settings.as_deref())?;

    if let Some(ref script) = args.print_command {
        print_command(&settings, script);
        return Ok(());
    }

    let num_stddev = args.num_stddev.unwrap_or(settings.num_stddev);
    debug!("Using num_stddev = {num_stddev}");

    let text = read_input(args.input_path())?;
    let profiles = parse_str(&text).context("Failed to parse profiler output")?;
    let hot_lines = collect_hot_lines(&profiles, num_stddev);
    let report = render_report(&profiles);

    if args.plain {
        println!("{report}");
    } else {
        let ranges = locate_hot_lines(&report, &hot_lines);
        println!("{}", annotate_report(&report, &ranges));
    }

    if let Some(ref export_path) = args.export {
        let file = File::create(export_path).context("Failed to create export file")?;
        ReportExporter::new(&profiles, num_stddev)
            .export(BufWriter::new(file))
            .context("Failed to export report")?;
        if !args.quiet {
            eprintln!("saved: {}", export_path.display());
        }
    }

    if !args.quiet {
        eprintln!("{} functions, {} hot lines (k = {num_stddev})", profiles.len(), hot_lines.len());
    }

    Ok(())
}
