//! Attaching an annotation set to an existing check run
//!
//! The transport lives behind [`CheckRunClient`]; this module only decides
//! which calls to make and what a missing check run means.

use crate::annotation::{Annotation, AnnotationSet};
use crate::error::AnnotateError;
use serde::{Deserialize, Serialize};

/// A check run as returned by the hosting platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRun {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// The `output` object of a check-run update.
///
/// `annotations` replaces any annotations previously attached to the run.
#[derive(Debug, Clone, Serialize)]
pub struct CheckRunOutput<'a> {
    pub title: &'a str,
    pub summary: &'a str,
    pub text: &'a str,
    pub annotations: &'a [Annotation],
}

impl<'a> From<&'a AnnotationSet> for CheckRunOutput<'a> {
    fn from(set: &'a AnnotationSet) -> Self {
        Self {
            title: &set.title,
            summary: &set.summary,
            text: &set.text,
            annotations: &set.annotations,
        }
    }
}

/// Transport for the check-run endpoints.
///
/// Implementations are bound to a single repository; `git_ref` is the
/// commit the check runs belong to.
pub trait CheckRunClient {
    /// The check run on `git_ref` whose name equals `name`, if any
    fn find_check_run(&self, git_ref: &str, name: &str) -> Result<Option<CheckRun>, AnnotateError>;

    /// Every check run on `git_ref` (diagnostics only)
    fn list_check_runs(&self, git_ref: &str) -> Result<Vec<CheckRun>, AnnotateError>;

    /// Overwrite the output of check run `id`
    fn update_check_run(&self, id: u64, output: &CheckRunOutput<'_>) -> Result<(), AnnotateError>;
}

/// Result of a publish attempt that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Updated {
        check_run_id: u64,
        annotations: usize,
    },
    /// No check run matched; nothing was updated.
    ///
    /// `available` lists the check run names on the ref, or `None` when
    /// that listing could not be fetched.
    CheckRunNotFound {
        job_name: String,
        available: Option<Vec<String>>,
    },
}

/// Find the check run named `job_name` on `git_ref` and replace its output
/// with `set`.
pub fn publish(
    client: &dyn CheckRunClient,
    git_ref: &str,
    job_name: &str,
    set: &AnnotationSet,
) -> Result<PublishOutcome, AnnotateError> {
    let check_run = match client.find_check_run(git_ref, job_name)? {
        Some(run) => run,
        None => {
            let available = client
                .list_check_runs(git_ref)
                .ok()
                .map(|runs| runs.into_iter().map(|r| r.name).collect());
            return Ok(PublishOutcome::CheckRunNotFound {
                job_name: job_name.to_string(),
                available,
            });
        }
    };

    client.update_check_run(check_run.id, &CheckRunOutput::from(set))?;

    Ok(PublishOutcome::Updated {
        check_run_id: check_run.id,
        annotations: set.annotations.len(),
    })
}
