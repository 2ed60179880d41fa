//! Tests for failure location recovery

use junit_annotate_core::{FailureLocator, LocatorChain, MinitestLocator, SourceLocation};

const MINITEST_FAILURE: &str = "Expected: 1
  Actual: 2 (Minitest::Assertion)
/home/ci/app/test/models/user_test.rb:42:in `block in <class:UserTest>'
/home/ci/app/vendor/gems/minitest/lib/minitest/test.rb:98:in `run'";

#[test]
fn test_minitest_extracts_first_path_after_marker() {
    let loc = MinitestLocator::new().locate(MINITEST_FAILURE).unwrap();
    assert_eq!(
        loc,
        SourceLocation {
            path: "/home/ci/app/test/models/user_test.rb".to_string(),
            line: 42,
        }
    );
}

#[test]
fn test_minitest_requires_marker() {
    let text = "RuntimeError: boom\n/home/ci/app/test/models/user_test.rb:42:in `test_x'";
    assert!(MinitestLocator::new().locate(text).is_none());
}

#[test]
fn test_minitest_requires_directory_separator() {
    let text = "Expected false (Minitest::Assertion)\nuser_test.rb:42";
    assert!(MinitestLocator::new().locate(text).is_none());
}

#[test]
fn test_minitest_unexpected_error_not_matched() {
    let text = "NoMethodError: undefined method `foo' (Minitest::UnexpectedError)\n/app/test/a_test.rb:3";
    assert!(MinitestLocator::new().locate(text).is_none());
}

#[test]
fn test_chain_relativizes_to_workdir() {
    let chain = LocatorChain::new("/home/ci/app");
    let loc = chain.locate(MINITEST_FAILURE).unwrap();
    assert_eq!(loc.path, "test/models/user_test.rb");
    assert_eq!(loc.line, 42);
}

#[test]
fn test_chain_outside_workdir_escapes_upward() {
    let chain = LocatorChain::new("/home/ci/other");
    let loc = chain.locate(MINITEST_FAILURE).unwrap();
    assert_eq!(loc.path, "../app/test/models/user_test.rb");
}

#[test]
fn test_chain_no_match() {
    let chain = LocatorChain::new("/");
    assert!(chain.locate("AssertionError: expected 1 to equal 2").is_none());
    assert!(chain.locate("").is_none());
}

#[test]
fn test_chain_from_names() {
    let chain = LocatorChain::from_names(&["minitest".to_string()], "/").unwrap();
    assert_eq!(chain.names(), vec!["minitest"]);

    let empty = LocatorChain::from_names(&[], "/").unwrap();
    assert!(empty.names().is_empty());
    assert!(empty.locate(MINITEST_FAILURE).is_none());
}

#[test]
fn test_chain_rejects_unknown_locator() {
    let err = LocatorChain::from_names(&["jest".to_string()], "/")
        .err()
        .expect("unknown locator should be rejected");
    assert!(err.to_string().contains("jest"));
}

struct FixedLocator;

impl FailureLocator for FixedLocator {
    fn name(&self) -> &str {
        "fixed"
    }

    fn locate(&self, text: &str) -> Option<SourceLocation> {
        text.contains("FIXED").then(|| SourceLocation {
            path: "/repo/spec/fixed_spec.rb".to_string(),
            line: 7,
        })
    }
}

#[test]
fn test_chain_first_match_wins() {
    let chain = LocatorChain::with_locators(
        vec![Box::new(FixedLocator), Box::new(MinitestLocator::new())],
        "/home/ci/app",
    );
    let text = format!("FIXED\n{}", MINITEST_FAILURE);
    let loc = chain.locate(&text).unwrap();
    assert_eq!(loc.path, "../../../repo/spec/fixed_spec.rb");
    assert_eq!(loc.line, 7);

    // Falls through to the next locator
    let loc = chain.locate(MINITEST_FAILURE).unwrap();
    assert_eq!(loc.path, "test/models/user_test.rb");
}
