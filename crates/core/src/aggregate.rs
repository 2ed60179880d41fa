//! Folding parsed reports into run-wide totals

use crate::discovery::RawDocument;
use crate::error::AnnotateError;
use crate::report::{parse_report, ReportRecord, TestCaseRecord};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where a failing test case came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportOrigin {
    /// Position of the document in discovery order (0-based)
    pub document_index: usize,
    pub source: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite_name: Option<String>,
}

/// A failed or errored test case tagged with its report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailingCase {
    pub origin: ReportOrigin,
    pub case: TestCaseRecord,
}

/// Running totals over every report seen so far
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub num_tests: usize,
    pub num_skipped: usize,
    pub num_failed: usize,
    pub num_errored: usize,
    pub total_duration: f64,
    /// Documents recognized as test suites
    pub reports_parsed: usize,
    /// Well-formed documents without a `<testsuite>` root
    pub reports_skipped: usize,
    /// Failing cases in discovery-then-document order
    pub failing_cases: Vec<FailingCase>,
}

impl AggregateResult {
    /// Fold one report into the totals and return the updated accumulator.
    pub fn absorb(mut self, origin: ReportOrigin, record: ReportRecord) -> Self {
        self.num_tests += record.test_count;
        self.num_skipped += record.skipped_count;
        self.num_failed += record.failure_count;
        self.num_errored += record.error_count;
        self.total_duration += record.duration_seconds;
        self.reports_parsed += 1;

        let ReportRecord { test_cases, .. } = record;
        self.failing_cases.extend(
            test_cases
                .into_iter()
                .filter(|tc| tc.status.is_failing())
                .map(|case| FailingCase {
                    origin: origin.clone(),
                    case,
                }),
        );
        self
    }

    /// Record a document that parsed but was not a test suite.
    pub fn skip_unrecognized(mut self) -> Self {
        self.reports_skipped += 1;
        self
    }

    /// Whether any failure or error was reported by a suite header
    pub fn has_failures(&self) -> bool {
        self.num_failed + self.num_errored > 0
    }
}

/// Parse and fold documents in the order they are produced.
///
/// The first unreadable or malformed document aborts the fold; documents
/// after it are never read.
pub fn aggregate_documents<I>(documents: I) -> Result<AggregateResult, AnnotateError>
where
    I: IntoIterator<Item = Result<RawDocument, AnnotateError>>,
{
    let mut result = AggregateResult::default();

    for (document_index, document) in documents.into_iter().enumerate() {
        let RawDocument { path, bytes } = document?;

        let record = parse_report(&bytes).map_err(|e| AnnotateError::MalformedDocument {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        result = match record {
            Some(record) => {
                let origin = ReportOrigin {
                    document_index,
                    source: path,
                    suite_name: record.suite_name.clone(),
                };
                result.absorb(origin, record)
            }
            None => result.skip_unrecognized(),
        };
    }

    Ok(result)
}
