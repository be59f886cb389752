//! Command-line interface for hotline
//!
//! This module contains CLI argument parsing and configuration

pub mod args;

pub use args::Args;
