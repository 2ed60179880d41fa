//! `<testsuite>` → [`ReportRecord`] conversion

use super::tree::{parse_tree, Element, XmlError};
use super::{ReportRecord, TestCaseRecord, TestStatus};

const SUITE_TAG: &str = "testsuite";
const CASE_TAG: &str = "testcase";

/// Parse one raw report document.
///
/// - Not well-formed XML → `Err` (the caller treats this as fatal)
/// - Well-formed but the root is not `<testsuite>` → `Ok(None)`
/// - Otherwise → `Ok(Some(record))`
pub fn parse_report(bytes: &[u8]) -> Result<Option<ReportRecord>, XmlError> {
    let root = parse_tree(bytes)?;
    if root.name != SUITE_TAG {
        return Ok(None);
    }
    Ok(Some(read_suite(&root)))
}

fn read_suite(suite: &Element) -> ReportRecord {
    ReportRecord {
        suite_name: suite.attr("name").map(String::from),
        test_count: count_attr(suite, "tests"),
        failure_count: count_attr(suite, "failures"),
        error_count: count_attr(suite, "errors"),
        skipped_count: count_attr(suite, "skipped"),
        duration_seconds: seconds_attr(suite, "time"),
        test_cases: suite.children_named(CASE_TAG).map(read_case).collect(),
    }
}

fn read_case(case: &Element) -> TestCaseRecord {
    let mut record = TestCaseRecord {
        name: case.attr("name").unwrap_or_default().to_string(),
        classname: case.attr("classname").map(String::from),
        time: seconds_attr(case, "time"),
        status: TestStatus::Passed,
        failure_text: None,
        failure_message: None,
        failure_type: None,
    };

    let failure = case
        .child("failure")
        .map(|node| (TestStatus::Failed, node))
        .or_else(|| case.child("error").map(|node| (TestStatus::Errored, node)));

    if let Some((status, node)) = failure {
        record.status = status;
        record.failure_text = Some(node.text.trim().to_string());
        record.failure_message = node.attr("message").map(String::from);
        record.failure_type = node.attr("type").map(String::from);
    } else if case.child("skipped").is_some() {
        record.status = TestStatus::Skipped;
    }

    record
}

/// Numeric header attribute; missing, non-numeric, or negative values read as 0.
fn count_attr(element: &Element, key: &str) -> usize {
    let value = seconds_attr(element, key);
    value.trunc() as usize
}

fn seconds_attr(element: &Element, key: &str) -> f64 {
    element
        .attr(key)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}
