//! JSON output formatting for `--dry-run`

use junit_annotate_core::{AggregateResult, AnnotationSet, CheckRunOutput};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DryRunOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_name: Option<&'a str>,
    pub totals: JsonTotals,
    pub output: CheckRunOutput<'a>,
}

#[derive(Debug, Serialize)]
pub struct JsonTotals {
    pub tests: usize,
    pub failed: usize,
    pub errored: usize,
    pub skipped: usize,
    pub duration_seconds: f64,
    pub annotated_failures: usize,
    pub dropped_failures: usize,
}

impl<'a> DryRunOutput<'a> {
    pub fn new(
        check_name: Option<&'a str>,
        aggregate: &AggregateResult,
        set: &'a AnnotationSet,
    ) -> Self {
        Self {
            check_name,
            totals: JsonTotals {
                tests: aggregate.num_tests,
                failed: aggregate.num_failed,
                errored: aggregate.num_errored,
                skipped: aggregate.num_skipped,
                duration_seconds: aggregate.total_duration,
                annotated_failures: set.located.len(),
                dropped_failures: set.dropped,
            },
            output: CheckRunOutput::from(set),
        }
    }
}
