//! Output formatting module
//!
//! This module provides formatters for JSON, YAML, ANSI and plain text output
//! of crumb trails and batch reports.

pub mod ansi;
mod json;
mod yaml;

pub use ansi::{format_report_ansi, format_trail_ansi};
pub use json::{format_report_json, format_trail_json};
pub use yaml::{format_report_yaml, format_trail_yaml};

use crate::models::{CrumbTrail, TrailReport};
use thiserror::Error;

/// Output format errors
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Available output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JSON format
    #[default]
    Json,
    /// YAML format
    Yaml,
    /// ANSI colored text
    Ansi,
    /// Labels joined by the delimiter
    Text,
}

/// Format a single trail in the specified format
pub fn format_trail(trail: &CrumbTrail, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => format_trail_json(trail),
        OutputFormat::Yaml => format_trail_yaml(trail),
        OutputFormat::Ansi => Ok(format_trail_ansi(trail)),
        OutputFormat::Text => Ok(format_trail_text(trail)),
    }
}

/// Format a batch report in the specified format
pub fn format_report(report: &TrailReport, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => format_report_json(report),
        OutputFormat::Yaml => format_report_yaml(report),
        OutputFormat::Ansi => Ok(format_report_ansi(report)),
        OutputFormat::Text => Ok(format_report_text(report)),
    }
}

/// Labels joined by the trail's delimiter, which is written verbatim
pub fn format_trail_text(trail: &CrumbTrail) -> String {
    trail.labels().join(&format!(" {} ", trail.delimiter))
}

/// One `path: trail` line per request path
fn format_report_text(report: &TrailReport) -> String {
    let mut output = String::new();

    for entry in &report.trails {
        output.push_str(&format!("{}: {}\n", entry.path, format_trail_text(&entry.trail)));
    }

    output
}
