//! YAML output formatter

use crate::models::{CrumbTrail, TrailReport};
use crate::output::FormatError;

/// Format a trail as YAML
pub fn format_trail_yaml(trail: &CrumbTrail) -> Result<String, FormatError> {
    serde_yaml::to_string(trail).map_err(FormatError::from)
}

/// Format a batch report as YAML
pub fn format_report_yaml(report: &TrailReport) -> Result<String, FormatError> {
    serde_yaml::to_string(report).map_err(FormatError::from)
}
