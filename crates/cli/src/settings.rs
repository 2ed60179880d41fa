//! Effective run settings: CLI flags and action inputs over the config file

use anyhow::{bail, Context, Result};
use junit_annotate_core::AnnotateConfig;

use crate::Cli;

/// Inputs after merging flags/env, `.junit-annotate.toml`, and defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub report_glob: String,
    pub num_failures: usize,
    pub test_src_path: String,
    pub include_summary: bool,
    pub locators: Vec<String>,
    /// Required only when publishing
    pub job_name: Option<String>,
    /// Required only when publishing
    pub access_token: Option<String>,
    pub commit_sha: Option<String>,
    pub dry_run: bool,
}

impl Settings {
    /// Merge `cli` over `config`.
    ///
    /// `path` and `testSrcPath` are always required; the job name and token
    /// are checked later, only if the run publishes.
    pub fn resolve(cli: &Cli, config: &AnnotateConfig) -> Result<Self> {
        let report_glob = non_empty(cli.path.as_deref())
            .or(config.reports.path.as_deref())
            .context("No report glob given: set the `path` input, --path, or reports.path")?
            .to_string();

        let test_src_path = non_empty(cli.test_src_path.as_deref())
            .or(config.annotations.test_src_path.as_deref())
            .context(
                "No fallback source path given: set the `testSrcPath` input, --test-src-path, or annotations.test_src_path",
            )?
            .to_string();

        let include_summary = match non_empty(cli.include_summary.as_deref()) {
            Some(raw) => parse_bool_like(raw)
                .with_context(|| format!("Invalid includeSummary value `{}`", raw))?,
            None => config.annotations.include_summary,
        };

        let num_failures = match non_empty(cli.num_failures.as_deref()) {
            Some(raw) => raw.parse::<usize>().with_context(|| {
                format!("Invalid numFailures value `{}`: expected a non-negative integer", raw)
            })?,
            None => config.annotations.num_failures,
        };

        let job_name = non_empty(cli.annotation_job_name.as_deref())
            .or(config.check.job_name.as_deref())
            .map(String::from);

        let access_token = non_empty(cli.access_token.as_deref())
            .map(String::from)
            .or_else(|| std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()));

        Ok(Self {
            report_glob,
            num_failures,
            test_src_path,
            include_summary,
            locators: config.annotations.locators.clone(),
            job_name,
            access_token,
            commit_sha: non_empty(cli.commit_sha.as_deref()).map(String::from),
            dry_run: cli.dry_run,
        })
    }
}

/// Commit to annotate: the one the workflow runs on, else the `commit-sha` input.
pub fn resolve_commit_sha(workflow_sha: Option<&str>, input: Option<&str>) -> Option<String> {
    non_empty(workflow_sha)
        .or_else(|| non_empty(input))
        .map(String::from)
}

/// Action inputs are strings; accept the usual spellings of a boolean.
pub fn parse_bool_like(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => bail!("expected true or false, got `{}`", other),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
