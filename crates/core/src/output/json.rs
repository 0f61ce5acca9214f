//! JSON output formatter

use crate::models::{CrumbTrail, TrailReport};
use crate::output::FormatError;

/// Format a trail as pretty-printed JSON
pub fn format_trail_json(trail: &CrumbTrail) -> Result<String, FormatError> {
    serde_json::to_string_pretty(trail).map_err(FormatError::from)
}

/// Format a batch report as pretty-printed JSON
pub fn format_report_json(report: &TrailReport) -> Result<String, FormatError> {
    serde_json::to_string_pretty(report).map_err(FormatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::{sample_report, sample_trail};
    use serde_json::Value;

    #[test]
    fn test_format_trail_json() {
        let json = format_trail_json(&sample_trail()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["delimiter"], "&raquo;");
        assert_eq!(value["crumbs"][0]["href"], "/");
        assert_eq!(value["crumbs"][1]["fragment"], "some-kind");
        assert_eq!(value["crumbs"][2]["label"], "Path");
    }

    #[test]
    fn test_format_report_json_flattens_trails() {
        let json = format_report_json(&sample_report()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["trails"][0]["path"], "/some-kind/path");
        assert_eq!(value["trails"][0]["crumbs"].as_array().unwrap().len(), 3);
        assert_eq!(value["metadata"]["path_count"], 2);
    }
}
