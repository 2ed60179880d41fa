//! Tests for JUnit report parsing

use junit_annotate_core::{parse_report, TestStatus};

#[test]
fn test_parse_suite_header() {
    let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<testsuite name="UserTest" tests="3" failures="1" errors="0" skipped="0" time="1.5">
  <testcase name="test_a" classname="UserTest" time="0.5"/>
  <testcase name="test_b" classname="UserTest" time="0.5"/>
  <testcase name="test_c" classname="UserTest" time="0.5">
    <failure message="Expected 1, got 2" type="Minitest::Assertion">boom</failure>
  </testcase>
</testsuite>"#;

    let record = parse_report(xml).unwrap().expect("testsuite root");
    assert_eq!(record.suite_name.as_deref(), Some("UserTest"));
    assert_eq!(record.test_count, 3);
    assert_eq!(record.failure_count, 1);
    assert_eq!(record.error_count, 0);
    assert_eq!(record.skipped_count, 0);
    assert_eq!(record.duration_seconds, 1.5);
    assert_eq!(record.test_cases.len(), 3);
}

#[test]
fn test_test_cases_keep_document_order() {
    let xml = br#"<testsuite tests="3">
  <testcase name="zeta"/>
  <testcase name="alpha"/>
  <testcase name="mid"/>
</testsuite>"#;

    let record = parse_report(xml).unwrap().unwrap();
    let names: Vec<&str> = record.test_cases.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_single_test_case_is_a_sequence() {
    let xml = br#"<testsuite tests="1"><testcase name="only"/></testsuite>"#;
    let record = parse_report(xml).unwrap().unwrap();
    assert_eq!(record.test_cases.len(), 1);
    assert_eq!(record.test_cases[0].name, "only");
    assert_eq!(record.test_cases[0].status, TestStatus::Passed);
}

#[test]
fn test_no_test_cases() {
    let xml = br#"<testsuite tests="0" failures="0" errors="0" skipped="0" time="0"></testsuite>"#;
    let record = parse_report(xml).unwrap().unwrap();
    assert!(record.test_cases.is_empty());
}

#[test]
fn test_failure_captures_text_and_message() {
    let xml = br#"<testsuite>
  <testcase name="test_login">
    <failure message="Expected true" type="Minitest::Assertion"><![CDATA[Expected true (Minitest::Assertion)
/app/test/login_test.rb:12:in `test_login']]></failure>
  </testcase>
</testsuite>"#;

    let record = parse_report(xml).unwrap().unwrap();
    let case = &record.test_cases[0];
    assert_eq!(case.status, TestStatus::Failed);
    assert_eq!(case.failure_message.as_deref(), Some("Expected true"));
    assert_eq!(case.failure_type.as_deref(), Some("Minitest::Assertion"));
    let text = case.failure_text.as_deref().unwrap();
    assert!(text.starts_with("Expected true (Minitest::Assertion)"));
    assert!(text.ends_with("/app/test/login_test.rb:12:in `test_login'"));
}

#[test]
fn test_error_node_marks_errored() {
    let xml = br#"<testsuite errors="1">
  <testcase name="test_crash"><error message="NoMethodError: undefined method">trace</error></testcase>
</testsuite>"#;

    let record = parse_report(xml).unwrap().unwrap();
    let case = &record.test_cases[0];
    assert_eq!(case.status, TestStatus::Errored);
    assert_eq!(case.failure_text.as_deref(), Some("trace"));
    assert_eq!(record.failing_cases().count(), 1);
}

#[test]
fn test_skipped_node_is_informational() {
    let xml = br#"<testsuite tests="2" skipped="0">
  <testcase name="a"><skipped/></testcase>
  <testcase name="b"/>
</testsuite>"#;

    let record = parse_report(xml).unwrap().unwrap();
    assert_eq!(record.test_cases[0].status, TestStatus::Skipped);
    // Header counts are trusted, not recomputed
    assert_eq!(record.skipped_count, 0);
    assert_eq!(record.failing_cases().count(), 0);
}

#[test]
fn test_missing_header_attributes_read_as_zero() {
    let xml = br#"<testsuite><testcase name="a"/></testsuite>"#;
    let record = parse_report(xml).unwrap().unwrap();
    assert_eq!(record.test_count, 0);
    assert_eq!(record.failure_count, 0);
    assert_eq!(record.error_count, 0);
    assert_eq!(record.skipped_count, 0);
    assert_eq!(record.duration_seconds, 0.0);
}

#[test]
fn test_unrecognized_root_is_not_an_error() {
    let xml = br#"<coverage line-rate="0.9"><packages/></coverage>"#;
    assert!(parse_report(xml).unwrap().is_none());
}

#[test]
fn test_testsuites_wrapper_is_unrecognized() {
    let xml = br#"<testsuites><testsuite tests="1"><testcase name="a"/></testsuite></testsuites>"#;
    assert!(parse_report(xml).unwrap().is_none());
}

#[test]
fn test_malformed_document_is_an_error() {
    assert!(parse_report(b"<testsuite><testcase></testsuite>").is_err());
    assert!(parse_report(b"<testsuite tests=\"1\">").is_err());
    assert!(parse_report(b"").is_err());
}

#[test]
fn test_content_after_root_is_an_error() {
    let xml = br#"<testsuite tests="1"><testcase name="a"/></testsuite><other/>"#;
    assert!(parse_report(xml).is_err());
}
