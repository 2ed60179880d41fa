//! junit-annotate CLI library, exposed for integration tests

pub mod commands;
pub mod output;
pub mod progress;
pub mod settings;

use clap::Parser;
use std::path::PathBuf;

pub use settings::Settings;

/// Command-line arguments.
///
/// Every action input falls back to the `INPUT_*` variable GitHub Actions
/// sets for it, so the binary runs unchanged as an action entrypoint.
#[derive(Parser, Debug, Default)]
#[command(name = "junit-annotate")]
#[command(about = "Attach JUnit test results to a GitHub check run", long_about = None)]
#[command(version = junit_annotate_core::VERSION)]
pub struct Cli {
    /// Glob selecting JUnit report files
    #[arg(long, env = "INPUT_PATH")]
    pub path: Option<String>,

    /// Accepted for compatibility; has no effect
    #[arg(long, env = "INPUT_INCLUDESUMMARY")]
    pub include_summary: Option<String>,

    /// Maximum number of failure annotations
    #[arg(long, env = "INPUT_NUMFAILURES")]
    pub num_failures: Option<String>,

    /// Token used for the Checks API (falls back to GITHUB_TOKEN)
    #[arg(long, env = "INPUT_ACCESS-TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Path used for the summary and for failures with no known location
    #[arg(long, env = "INPUT_TESTSRCPATH")]
    pub test_src_path: Option<String>,

    /// Name of the check run to update
    #[arg(long, env = "INPUT_ANNOTATIONJOBNAME")]
    pub annotation_job_name: Option<String>,

    /// Commit to annotate when GITHUB_SHA is not set
    #[arg(long, env = "INPUT_COMMIT-SHA")]
    pub commit_sha: Option<String>,

    /// Explicit config file (default: nearest .junit-annotate.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the check-run payload as JSON instead of publishing
    #[arg(long)]
    pub dry_run: bool,
}
