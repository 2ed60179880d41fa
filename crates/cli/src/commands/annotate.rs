//! Main annotate command: discovery through publishing

use anyhow::{Context, Result};
use colored::Colorize;
use junit_annotate_core::{
    aggregate_documents, discover_reports, publish, read_documents, AggregateResult,
    AnnotateConfig, AnnotationBuilder, AnnotationSet, CheckRunClient, LocatorChain,
    PublishOutcome,
};
use std::path::Path;

use crate::output::checks::{GitHubChecksClient, GitHubContext};
use crate::output::{json, terminal, workflow};
use crate::progress::Step;
use crate::settings::{resolve_commit_sha, Settings};
use crate::Cli;

/// Annotations per request accepted by the Checks API
const API_ANNOTATION_LIMIT: usize = 50;

pub fn run(cli: &Cli) -> Result<()> {
    let workdir = std::env::current_dir().context("Failed to resolve working directory")?;

    // ── 1. Settings ──────────────────────────────────────────────
    let config = load_config(cli, &workdir)?;
    let settings = Settings::resolve(cli, &config)?;

    eprintln!(
        "{}",
        format!("  junit-annotate v{}", junit_annotate_core::VERSION).bold()
    );
    if !settings.include_summary {
        eprintln!(
            "  {}",
            "includeSummary=false is accepted but has no effect".dimmed()
        );
    }

    // ── 2. Aggregate ─────────────────────────────────────────────
    let aggregate = collect_results(&settings)?;

    // ── 3. Annotate ──────────────────────────────────────────────
    let locators = LocatorChain::from_names(&settings.locators, &workdir)?;
    let builder = AnnotationBuilder::new(
        settings.num_failures,
        settings.test_src_path.clone(),
        locators,
    );
    let set = builder.build(&aggregate);
    print_annotations(&set);

    // ── 4. Publish ───────────────────────────────────────────────
    if settings.dry_run {
        let out = json::DryRunOutput::new(settings.job_name.as_deref(), &aggregate, &set);
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let job_name = settings.job_name.as_deref().context(
        "No check run name given: set the `annotationJobName` input, --annotation-job-name, or check.job_name",
    )?;
    let token = settings
        .access_token
        .clone()
        .context("No access token given: set the `access-token` input, --access-token, or GITHUB_TOKEN")?;
    let workflow_sha = std::env::var("GITHUB_SHA").ok();
    let git_ref = resolve_commit_sha(workflow_sha.as_deref(), settings.commit_sha.as_deref())
        .context("No commit to annotate: GITHUB_SHA is unset and no `commit-sha` input was given")?;

    let ctx = GitHubContext::from_env(token)?;
    eprintln!(
        "  Repository: {}/{} @ {}",
        ctx.owner,
        ctx.repo,
        git_ref.dimmed()
    );
    let client = GitHubChecksClient::new(ctx)?;

    publish_results(&client, &git_ref, job_name, &set)
}

fn load_config(cli: &Cli, workdir: &Path) -> Result<AnnotateConfig> {
    match cli.config {
        Some(ref path) => AnnotateConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => AnnotateConfig::find_and_load(workdir),
    }
}

fn collect_results(settings: &Settings) -> Result<AggregateResult> {
    let step = Step::new("Discovering reports");
    let files = discover_reports(&settings.report_glob)?;
    if files.is_empty() {
        step.skip(&format!("No files match {}", settings.report_glob));
    } else {
        step.finish(&format!("{} file(s)", files.len()));
    }

    let step = Step::new("Aggregating results");
    let aggregate = aggregate_documents(read_documents(files))?;
    if aggregate.reports_skipped > 0 {
        step.warn(format!(
            "{} file(s) are not JUnit test suites and were ignored",
            aggregate.reports_skipped
        ));
    }
    step.finish(&format!(
        "{} tests, {} failed, {} errored, {} skipped",
        aggregate.num_tests, aggregate.num_failed, aggregate.num_errored, aggregate.num_skipped
    ));

    Ok(aggregate)
}

fn print_annotations(set: &AnnotationSet) {
    eprintln!();
    for failure in &set.located {
        eprintln!("{}", terminal::format_failure(failure));
    }
    if set.dropped > 0 {
        eprintln!(
            "  {}",
            format!("… {} more failure(s) not annotated", set.dropped).dimmed()
        );
    }
    if !set.located.is_empty() || set.dropped > 0 {
        eprintln!();
    }

    eprintln!("  {}", "\u{2500}".repeat(60).dimmed());
    let summary = if set.level == junit_annotate_core::AnnotationLevel::Failure {
        set.summary.red()
    } else {
        set.summary.green()
    };
    eprintln!("  {}", summary);

    if set.annotations.len() > API_ANNOTATION_LIMIT {
        eprintln!(
            "  {}: {} annotations exceed the {} per request the Checks API accepts; lower numFailures if the update is rejected",
            "warn".yellow(),
            set.annotations.len(),
            API_ANNOTATION_LIMIT
        );
    }
}

/// Publish `set` and report the outcome. A missing check run is not an error.
pub fn publish_results(
    client: &dyn CheckRunClient,
    git_ref: &str,
    job_name: &str,
    set: &AnnotationSet,
) -> Result<()> {
    let step = Step::new(format!("Updating check run `{}`", job_name));

    match publish(client, git_ref, job_name, set)? {
        PublishOutcome::Updated {
            check_run_id,
            annotations,
        } => {
            step.finish(&format!(
                "check run {} — {} annotation(s)",
                check_run_id, annotations
            ));
        }
        PublishOutcome::CheckRunNotFound {
            job_name,
            available,
        } => {
            step.skip(&format!(
                "Could not find a check for the job {}, exiting early",
                job_name
            ));
            match available {
                Some(names) if names.is_empty() => {
                    eprintln!("  {}", "No check runs exist for this commit".dimmed())
                }
                Some(names) => eprintln!(
                    "  {} {}",
                    "Check runs on this commit:".dimmed(),
                    names.join(", ")
                ),
                None => eprintln!("  {}", "Could not list check runs for this commit".dimmed()),
            }
            println!(
                "{}",
                workflow::notice(&format!(
                    "No check run named {} on {}; annotations were not published",
                    job_name, git_ref
                ))
            );
        }
    }

    Ok(())
}
