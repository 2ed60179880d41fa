//! Terminal output formatting

use colored::Colorize;
use junit_annotate_core::{LocatedFailure, TestStatus};

pub fn format_failure(failure: &LocatedFailure) -> String {
    let case = failure.case();
    let icon = match case.status {
        TestStatus::Errored => "💥",
        _ => "❌",
    };

    let location = if failure.resolved {
        format!("{}:{}", failure.path, failure.line)
    } else {
        format!("{} {}", failure.path, "(location unknown)".dimmed())
    };

    format!("  {} {} {}", icon, case.name, location)
}
