//! GitHub Checks API transport.
//!
//! Looks up a check run by name on a commit and overwrites its output via the
//! GitHub REST API.
//!
//! Environment variables (all standard GitHub Actions variables):
//! - `GITHUB_REPOSITORY`: `owner/repo` (e.g. `acme/myapp`)
//! - `GITHUB_SHA`: commit whose check runs are searched
//! - `GITHUB_API_URL`: API root, for GitHub Enterprise Server (optional)
//!
//! Usage in a workflow:
//! ```yaml
//! - run: junit-annotate --path 'test/reports/*.xml' --test-src-path test --annotation-job-name test
//!   env:
//!     GITHUB_TOKEN: ${{ secrets.GITHUB_TOKEN }}
//! ```

use junit_annotate_core::{AnnotateError, CheckRun, CheckRunClient, CheckRunOutput};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://api.github.com";
const TIMEOUT_SECS: u64 = 30;

/// Errors building a [`GitHubContext`] from the environment
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("GITHUB_REPOSITORY is not set")]
    MissingRepository,
    #[error("GITHUB_REPOSITORY must look like `owner/repo`, got `{0}`")]
    InvalidRepository(String),
}

/// Context needed to call the GitHub API.
#[derive(Debug, Clone)]
pub struct GitHubContext {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub api_url: String,
}

impl GitHubContext {
    /// Build context from an `owner/repo` string and an optional API root.
    pub fn new(
        token: impl Into<String>,
        repository: &str,
        api_url: Option<&str>,
    ) -> Result<Self, ContextError> {
        let (owner, repo) = repository
            .split_once('/')
            .filter(|(o, r)| !o.is_empty() && !r.is_empty() && !r.contains('/'))
            .ok_or_else(|| ContextError::InvalidRepository(repository.to_string()))?;

        let api_url = api_url
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            token: token.into(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            api_url,
        })
    }

    /// Build context from environment variables set by GitHub Actions.
    pub fn from_env(token: impl Into<String>) -> Result<Self, ContextError> {
        let repository =
            std::env::var("GITHUB_REPOSITORY").map_err(|_| ContextError::MissingRepository)?;
        let api_url = std::env::var("GITHUB_API_URL").ok();
        Self::new(token, &repository, api_url.as_deref())
    }

    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_url, self.owner, self.repo, path
        )
    }
}

// ── GitHub API types ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListCheckRunsResponse {
    #[serde(default)]
    pub total_count: u64,
    pub check_runs: Vec<CheckRun>,
}

#[derive(Debug, Serialize)]
pub struct UpdateCheckRunRequest<'a> {
    pub output: &'a CheckRunOutput<'a>,
}

// ── Client ───────────────────────────────────────────────────────────────────

/// [`CheckRunClient`] backed by the GitHub REST API
pub struct GitHubChecksClient {
    client: Client,
    ctx: GitHubContext,
}

impl GitHubChecksClient {
    pub fn new(ctx: GitHubContext) -> Result<Self, AnnotateError> {
        let client = Client::builder()
            .user_agent(concat!("junit-annotate/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .map_err(|e| AnnotateError::Publish(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, ctx })
    }

    pub fn context(&self) -> &GitHubContext {
        &self.ctx
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Authorization", format!("Bearer {}", self.ctx.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    fn list(&self, git_ref: &str, name: Option<&str>) -> Result<Vec<CheckRun>, AnnotateError> {
        let url = self.ctx.api_url(&format!("commits/{}/check-runs", git_ref));

        let mut request = self.client.get(&url).query(&[("per_page", "100")]);
        if let Some(name) = name {
            request = request.query(&[("check_name", name)]);
        }

        let resp = self
            .authorized(request)
            .send()
            .map_err(|e| AnnotateError::Publish(format!("Failed to list check runs: {}", e)))?;

        let body: ListCheckRunsResponse = check_status(resp)?
            .json()
            .map_err(|e| AnnotateError::Publish(format!("Failed to parse check runs: {}", e)))?;
        Ok(body.check_runs)
    }
}

impl CheckRunClient for GitHubChecksClient {
    fn find_check_run(&self, git_ref: &str, name: &str) -> Result<Option<CheckRun>, AnnotateError> {
        let runs = self.list(git_ref, Some(name))?;
        Ok(runs.into_iter().find(|r| r.name == name))
    }

    fn list_check_runs(&self, git_ref: &str) -> Result<Vec<CheckRun>, AnnotateError> {
        self.list(git_ref, None)
    }

    fn update_check_run(&self, id: u64, output: &CheckRunOutput<'_>) -> Result<(), AnnotateError> {
        let url = self.ctx.api_url(&format!("check-runs/{}", id));

        let resp = self
            .authorized(self.client.patch(&url))
            .json(&UpdateCheckRunRequest { output })
            .send()
            .map_err(|e| AnnotateError::Publish(format!("Failed to update check run: {}", e)))?;

        check_status(resp)?;
        Ok(())
    }
}

fn check_status(resp: Response) -> Result<Response, AnnotateError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let text = resp.text().unwrap_or_default();
    Err(AnnotateError::Publish(format!(
        "GitHub API error {}: {}",
        status, text
    )))
}
