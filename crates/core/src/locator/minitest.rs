//! Minitest assertion failures
//!
//! Minitest renders a failed assertion as the exception class followed by a
//! backtrace whose first absolute entry points at the test:
//!
//! ```text
//! Expected: 1
//!   Actual: 2 (Minitest::Assertion)
//! /home/ci/app/test/models/user_test.rb:42:in `test_name'
//! ```

use super::{FailureLocator, SourceLocation};
use regex::Regex;
use std::sync::LazyLock;

static ASSERTION_LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)\(Minitest::Assertion\)[^/]*((/[^:]+):(\d+))").unwrap()
});

pub struct MinitestLocator;

impl MinitestLocator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MinitestLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl FailureLocator for MinitestLocator {
    fn name(&self) -> &str {
        "minitest"
    }

    fn locate(&self, text: &str) -> Option<SourceLocation> {
        let caps = ASSERTION_LOCATION_RE.captures(text)?;
        let line = caps[3].parse::<usize>().ok()?;
        Some(SourceLocation {
            path: caps[2].to_string(),
            line,
        })
    }
}
