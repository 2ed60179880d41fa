//! End-to-end pipeline: discovery → aggregation → annotations

use junit_annotate_core::{
    aggregate_documents, discover_reports, read_documents, AnnotateError, AnnotationBuilder,
    AnnotationLevel, AnnotationSet, LocatorChain,
};
use tempfile::TempDir;

const FALLBACK: &str = "test/fallback_test.rb";

const REPORT_ONE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuite name="FooTest" tests="3" failures="1" errors="0" skipped="0" time="1.5">
  <testcase name="test_ok" classname="FooTest" time="0.5"/>
  <testcase name="test_also_ok" classname="FooTest" time="0.5"/>
  <testcase name="test_foo" classname="FooTest" time="0.5">
    <failure message="Expected: 1&#10;  Actual: 2" type="Minitest::Assertion">Expected: 1
  Actual: 2 (Minitest::Assertion)
/src/foo_test.rb:42:in `test_foo'</failure>
  </testcase>
</testsuite>"#;

const REPORT_TWO: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuite name="BarTest" tests="2" failures="0" errors="1" skipped="1" time="0.5">
  <testcase name="test_bar" classname="BarTest" time="0.4">
    <error message="RuntimeError: boom" type="RuntimeError">RuntimeError: boom
    lib/bar.rb:7:in `call'</error>
  </testcase>
  <testcase name="test_skipped" classname="BarTest" time="0.1"><skipped/></testcase>
</testsuite>"#;

fn run(dir: &TempDir, max_failures: usize) -> Result<AnnotationSet, AnnotateError> {
    let pattern = format!("{}/*.xml", dir.path().display());
    let files = discover_reports(&pattern)?;
    let aggregate = aggregate_documents(read_documents(files))?;
    let builder = AnnotationBuilder::new(max_failures, FALLBACK, LocatorChain::new("/"));
    Ok(builder.build(&aggregate))
}

fn two_reports() -> TempDir {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("1-foo.xml"), REPORT_ONE).unwrap();
    std::fs::write(tmp.path().join("2-bar.xml"), REPORT_TWO).unwrap();
    tmp
}

#[test]
fn test_two_reports_with_cap_five() {
    let tmp = two_reports();
    let set = run(&tmp, 5).unwrap();

    assert_eq!(set.annotations.len(), 3);

    let summary = &set.annotations[0];
    assert_eq!(summary.annotation_level, AnnotationLevel::Failure);
    assert_eq!(summary.path, FALLBACK);
    assert_eq!(summary.start_line, 0);
    for needle in ["5 tests", "2.0 seconds", "1 Errored", "1 Failed", "1 Skipped"] {
        assert!(
            summary.message.contains(needle),
            "summary {:?} missing {:?}",
            summary.message,
            needle
        );
    }

    let located = &set.annotations[1];
    assert_eq!(located.path, "src/foo_test.rb");
    assert_eq!(located.start_line, 42);
    assert_eq!(located.end_line, 42);

    let fallback = &set.annotations[2];
    assert_eq!(fallback.path, FALLBACK);
    assert_eq!(fallback.start_line, 0);
    assert!(fallback.message.contains("test_bar"));
    assert_eq!(set.dropped, 0);
}

#[test]
fn test_two_reports_with_cap_zero() {
    let tmp = two_reports();
    let set = run(&tmp, 0).unwrap();
    assert_eq!(set.annotations.len(), 1);
    assert_eq!(set.annotations[0].message, set.summary);
    assert_eq!(set.dropped, 2);
}

#[test]
fn test_non_report_xml_is_ignored() {
    let tmp = two_reports();
    std::fs::write(tmp.path().join("3-pom.xml"), "<project><modelVersion>4.0.0</modelVersion></project>").unwrap();
    let set = run(&tmp, 5).unwrap();
    assert_eq!(set.annotations.len(), 3);
    assert!(set.summary.contains("5 tests"));
}

#[test]
fn test_corrupt_report_fails_the_run() {
    let tmp = two_reports();
    std::fs::write(tmp.path().join("0-corrupt.xml"), "<testsuite tests=\"1\"><testcase").unwrap();
    let err = run(&tmp, 5).unwrap_err();
    assert!(matches!(err, AnnotateError::MalformedDocument { .. }));
    assert!(err.to_string().contains("0-corrupt.xml"));
}

#[test]
fn test_no_reports() {
    let tmp = TempDir::new().unwrap();
    let set = run(&tmp, 5).unwrap();
    assert_eq!(set.annotations.len(), 1);
    assert_eq!(set.level, AnnotationLevel::Notice);
}
