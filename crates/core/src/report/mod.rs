//! JUnit report documents and their uniform in-memory form

pub mod parser;
pub mod tree;

pub use parser::parse_report;
pub use tree::XmlError;

use serde::{Deserialize, Serialize};

/// Outcome of a single executed test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    Errored,
    Skipped,
}

impl TestStatus {
    /// Failed and errored cases are the ones that get annotated
    pub fn is_failing(self) -> bool {
        matches!(self, TestStatus::Failed | TestStatus::Errored)
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestStatus::Passed => write!(f, "passed"),
            TestStatus::Failed => write!(f, "failed"),
            TestStatus::Errored => write!(f, "errored"),
            TestStatus::Skipped => write!(f, "skipped"),
        }
    }
}

/// One `<testcase>` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCaseRecord {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classname: Option<String>,

    /// Wall time in seconds (0 when the report omits it)
    #[serde(default)]
    pub time: f64,

    pub status: TestStatus,

    /// Raw diagnostic text of the `<failure>`/`<error>` node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_text: Option<String>,

    /// Short summary from the failure node's `message` attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<String>,

    /// Exception or assertion class from the failure node's `type` attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_type: Option<String>,
}

/// One parsed `<testsuite>` document.
///
/// Counts come straight from the suite header and are never recomputed from
/// `test_cases`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite_name: Option<String>,
    pub test_count: usize,
    pub failure_count: usize,
    pub error_count: usize,
    pub skipped_count: usize,
    pub duration_seconds: f64,
    pub test_cases: Vec<TestCaseRecord>,
}

impl ReportRecord {
    /// Failed and errored cases, in document order
    pub fn failing_cases(&self) -> impl Iterator<Item = &TestCaseRecord> {
        self.test_cases.iter().filter(|tc| tc.status.is_failing())
    }
}
