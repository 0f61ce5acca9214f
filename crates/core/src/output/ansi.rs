//! ANSI colored output formatter
//!
//! This module provides colorful terminal output for crumb trails.
//! Ancestor crumbs are shown as underlined links with their href, the
//! current page is bold and the delimiter is written verbatim.

use crate::models::{Crumb, CrumbTrail, TrailReport};

// ANSI escape codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const UNDERLINE: &str = "\x1b[4m";

// Colors
const BRIGHT_CYAN: &str = "\x1b[96m";
const BRIGHT_WHITE: &str = "\x1b[97m";
const BRIGHT_YELLOW: &str = "\x1b[93m";

// Background colors
const BG_BLUE: &str = "\x1b[44m";

/// Format a linked ancestor crumb
fn format_link(crumb: &Crumb) -> String {
    format!(
        "{}{}{}{}{}({}){}",
        UNDERLINE, BRIGHT_CYAN, crumb.label, RESET, DIM, crumb.href, RESET
    )
}

/// Format the current page crumb
fn format_final(crumb: &Crumb) -> String {
    format!("{}{}{}{}", BOLD, BRIGHT_WHITE, crumb.label, RESET)
}

/// Format a trail as a single ANSI colored line
pub fn format_trail_ansi(trail: &CrumbTrail) -> String {
    let Some((current, ancestors)) = trail.crumbs.split_last() else {
        return format!("{}(empty trail){}", DIM, RESET);
    };

    let delimiter = format!(" {}{}{} ", DIM, trail.delimiter, RESET);
    let mut parts: Vec<String> = ancestors.iter().map(format_link).collect();
    parts.push(format_final(current));

    parts.join(&delimiter)
}

/// Format a batch report as ANSI colored text
pub fn format_report_ansi(report: &TrailReport) -> String {
    let mut output = String::new();

    // Header
    output.push_str(&format!(
        "\n{}{}  Breadcrumb Trails  {}{}\n\n",
        BOLD, BG_BLUE, RESET, RESET
    ));

    for entry in &report.trails {
        output.push_str(&format!(
            "{}{}{}{}\n   {}\n",
            BOLD,
            BRIGHT_YELLOW,
            entry.path,
            RESET,
            format_trail_ansi(&entry.trail)
        ));
    }

    // Footer
    output.push_str(&format!(
        "\n{}Resolved {} path(s) in {}ms{}\n",
        DIM, report.metadata.path_count, report.metadata.duration_ms, RESET
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::{sample_report, sample_trail};

    #[test]
    fn test_format_trail_ansi() {
        let output = format_trail_ansi(&sample_trail());

        assert!(output.contains("Home"));
        assert!(output.contains("(/some-kind)"));
        assert!(output.contains(&format!("{}{}Path{}", BOLD, BRIGHT_WHITE, RESET)));
        assert_eq!(output.matches("&raquo;").count(), 2);
    }

    #[test]
    fn test_format_root_only_trail() {
        let trail = CrumbTrail {
            crumbs: vec![Crumb::root("Home")],
            delimiter: "|".to_string(),
        };

        let output = format_trail_ansi(&trail);
        assert!(output.contains("Home"));
        assert!(!output.contains('|'));
    }

    #[test]
    fn test_format_report_ansi() {
        let output = format_report_ansi(&sample_report());

        assert!(output.contains("Breadcrumb Trails"));
        assert!(output.contains("/some-kind/path"));
        assert!(output.contains("Resolved 2 path(s)"));
    }
}
