//! Configuration file parsing for .junit-annotate.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name searched for in the working directory and its ancestors
pub const CONFIG_FILE: &str = ".junit-annotate.toml";

/// Main configuration structure for .junit-annotate.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotateConfig {
    #[serde(default)]
    pub reports: ReportsConfig,

    #[serde(default)]
    pub annotations: AnnotationsConfig,

    #[serde(default)]
    pub check: CheckConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportsConfig {
    /// Glob selecting report documents (e.g. `"test/reports/**/*.xml"`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationsConfig {
    /// Maximum number of failure annotations
    #[serde(default = "default_num_failures")]
    pub num_failures: usize,

    /// Path used for the summary and for failures with no known location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_src_path: Option<String>,

    /// Accepted for action compatibility; the pipeline does not read it
    #[serde(default = "default_true")]
    pub include_summary: bool,

    /// Failure locators to try, in order
    #[serde(default = "default_locators")]
    pub locators: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Name of the check run to update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
}

// Default functions
fn default_num_failures() -> usize {
    10
}

fn default_true() -> bool {
    true
}

fn default_locators() -> Vec<String> {
    vec!["minitest".to_string()]
}

impl Default for AnnotationsConfig {
    fn default() -> Self {
        Self {
            num_failures: default_num_failures(),
            test_src_path: None,
            include_summary: true,
            locators: default_locators(),
        }
    }
}

impl AnnotateConfig {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AnnotateConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Find and load .junit-annotate.toml from the current directory or ancestors
    pub fn find_and_load(start_dir: &Path) -> Result<Self> {
        let mut current = start_dir;

        loop {
            let config_path = current.join(CONFIG_FILE);
            if config_path.exists() {
                return Self::from_file(&config_path);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        // No config found, use defaults
        Ok(Self::default())
    }
}
