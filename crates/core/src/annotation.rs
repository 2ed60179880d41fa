//! Check-run annotations built from aggregated test results
//!
//! The output of [`AnnotationBuilder::build`] is deterministic for a given
//! [`AggregateResult`]: the run summary always comes first, followed by at
//! most `max_failures` failure annotations in encounter order.

use crate::aggregate::{AggregateResult, FailingCase};
use crate::locator::LocatorChain;
use crate::report::TestCaseRecord;
use serde::{Deserialize, Serialize};

/// Title used for the check run output
pub const CHECK_TITLE: &str = "Junit Results";

/// Largest `output.text` and `raw_details` the Checks API accepts, in characters
pub const MAX_TEXT_CHARS: usize = 65_535;

/// Per-failure cap on diagnostic text in the markdown body
const MAX_DETAIL_CHARS: usize = 4_000;

/// Room kept for the omission note at the end of the body
const OMISSION_RESERVE: usize = 128;

/// Annotation severity as understood by the Checks API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationLevel {
    Notice,
    Failure,
}

impl std::fmt::Display for AnnotationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnnotationLevel::Notice => write!(f, "notice"),
            AnnotationLevel::Failure => write!(f, "failure"),
        }
    }
}

/// A single point annotation, serialized with the Checks API field names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub path: String,
    pub start_line: usize,
    pub end_line: usize,
    pub start_column: usize,
    pub end_column: usize,
    pub annotation_level: AnnotationLevel,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_details: Option<String>,
}

impl Annotation {
    fn point(path: &str, line: usize, level: AnnotationLevel, message: String) -> Self {
        Self {
            path: path.to_string(),
            start_line: line,
            end_line: line,
            start_column: 0,
            end_column: 0,
            annotation_level: level,
            message,
            raw_details: None,
        }
    }
}

/// A failing test case with its resolved source position
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedFailure {
    pub failure: FailingCase,
    pub path: String,
    /// 1-based, 0 when unknown
    pub line: usize,
    /// False when the fallback path was substituted
    pub resolved: bool,
}

impl LocatedFailure {
    pub fn case(&self) -> &TestCaseRecord {
        &self.failure.case
    }
}

/// Everything needed to overwrite a check run's output
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationSet {
    pub title: String,
    pub summary: String,
    /// Long-form markdown body
    pub text: String,
    /// Summary annotation first, then one per retained failure
    pub annotations: Vec<Annotation>,
    pub located: Vec<LocatedFailure>,
    /// Failing cases cut by the cap
    pub dropped: usize,
    pub level: AnnotationLevel,
}

/// Turns aggregate results into a capped annotation set
pub struct AnnotationBuilder {
    max_failures: usize,
    fallback_path: String,
    locators: LocatorChain,
}

impl AnnotationBuilder {
    pub fn new(max_failures: usize, fallback_path: impl Into<String>, locators: LocatorChain) -> Self {
        Self {
            max_failures,
            fallback_path: fallback_path.into(),
            locators,
        }
    }

    pub fn build(&self, aggregate: &AggregateResult) -> AnnotationSet {
        let level = if aggregate.has_failures() {
            AnnotationLevel::Failure
        } else {
            AnnotationLevel::Notice
        };
        let summary = summary_line(aggregate);

        let mut annotations = vec![Annotation::point(
            &self.fallback_path,
            0,
            level,
            summary.clone(),
        )];
        let mut located = Vec::new();

        for failing in aggregate.failing_cases.iter().take(self.max_failures) {
            let failure = self.locate(failing);
            annotations.push(failure_annotation(&failure));
            located.push(failure);
        }

        let dropped = aggregate.failing_cases.len() - located.len();

        let text = markdown_body(&summary, &located);

        AnnotationSet {
            title: CHECK_TITLE.to_string(),
            summary,
            text,
            annotations,
            located,
            dropped,
            level,
        }
    }

    /// Resolve a failing case's position, falling back to the configured
    /// test source path and line 0.
    pub fn locate(&self, failing: &FailingCase) -> LocatedFailure {
        let found = failing
            .case
            .failure_text
            .as_deref()
            .and_then(|text| self.locators.locate(text));

        match found {
            Some(location) => LocatedFailure {
                failure: failing.clone(),
                path: location.path,
                line: location.line,
                resolved: true,
            },
            None => LocatedFailure {
                failure: failing.clone(),
                path: self.fallback_path.clone(),
                line: 0,
                resolved: false,
            },
        }
    }
}

/// `Junit Results ran N tests in D seconds. E Errored, F Failed, S Skipped`
pub fn summary_line(aggregate: &AggregateResult) -> String {
    format!(
        "{} ran {} tests in {} seconds. {} Errored, {} Failed, {} Skipped",
        CHECK_TITLE,
        aggregate.num_tests,
        format_seconds(aggregate.total_duration),
        aggregate.num_errored,
        aggregate.num_failed,
        aggregate.num_skipped,
    )
}

/// At least one decimal, at most three: `2.0`, `1.5`, `0.123`.
pub fn format_seconds(seconds: f64) -> String {
    let fixed = format!("{:.3}", seconds);
    let trimmed = fixed.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Summary followed by one block per failure, kept within [`MAX_TEXT_CHARS`].
///
/// Blocks are appended in order until the next one would not fit; the rest
/// are counted in a closing note.
fn markdown_body(summary: &str, located: &[LocatedFailure]) -> String {
    let mut text = truncate_chars(summary, MAX_TEXT_CHARS - OMISSION_RESERVE);
    let mut used = text.chars().count();
    let mut omitted = 0;

    for failure in located {
        let block = failure_markdown(failure);
        let cost = block.chars().count() + 2;
        if omitted == 0 && used + cost + OMISSION_RESERVE <= MAX_TEXT_CHARS {
            text.push_str("\n\n");
            text.push_str(&block);
            used += cost;
        } else {
            omitted += 1;
        }
    }

    if omitted > 0 {
        text.push_str(&format!(
            "\n\n_{} more failure(s) omitted from this summary, see the annotations_",
            omitted
        ));
    }
    text
}

/// Keep the first `max` characters of `s`, marking the cut.
fn truncate_chars(s: &str, max: usize) -> String {
    const MARKER: &str = "\n… (truncated)";
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(MARKER.chars().count());
    let mut out: String = s.chars().take(keep).collect();
    out.push_str(MARKER);
    out
}

fn failure_annotation(failure: &LocatedFailure) -> Annotation {
    let case = failure.case();
    let mut message = format!("Junit test {} failed at {}:", case.name, failure.path);
    if let Some(ref detail) = case.failure_message {
        message.push_str(&format!("\n {}", detail));
    }

    let mut annotation = Annotation::point(
        &failure.path,
        failure.line,
        AnnotationLevel::Failure,
        message,
    );
    annotation.raw_details = case
        .failure_text
        .as_deref()
        .map(|text| truncate_chars(text, MAX_TEXT_CHARS));
    annotation
}

fn failure_markdown(failure: &LocatedFailure) -> String {
    let case = failure.case();
    let mut block = format!("### \u{274c} `{}`", case.name);
    if let Some(ref classname) = case.classname {
        block.push_str(&format!(" ({})", classname));
    }
    block.push('\n');

    if failure.resolved {
        block.push_str(&format!("\n`{}:{}`\n", failure.path, failure.line));
    } else {
        block.push_str(&format!("\n`{}` (location unknown)\n", failure.path));
    }

    let quoted = match (&case.failure_type, &case.failure_message) {
        (Some(kind), Some(message)) => Some(format!("**{}**: {}", kind, message)),
        (Some(kind), None) => Some(format!("**{}**", kind)),
        (None, Some(message)) => Some(message.clone()),
        (None, None) => None,
    };
    if let Some(quoted) = quoted {
        let quoted = truncate_chars(&quoted, MAX_DETAIL_CHARS);
        block.push_str(&format!("\n> {}\n", quoted.replace('\n', "\n> ")));
    }

    if let Some(ref text) = case.failure_text {
        if !text.is_empty() {
            let text = truncate_chars(text, MAX_DETAIL_CHARS);
            block.push_str(&format!("\n```\n{}\n```", text));
        }
    }

    block.trim_end().to_string()
}
