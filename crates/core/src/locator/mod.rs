//! Failure locators: recover a source `path:line` from opaque failure text
//!
//! Each locator understands one framework's failure rendering. A
//! [`LocatorChain`] tries the configured locators in order; when none of
//! them match, the caller falls back to the configured test source path and
//! line 0.

pub mod minitest;

use crate::error::AnnotateError;
use std::path::{Component, Path, PathBuf};

pub use minitest::MinitestLocator;

/// A source position recovered from failure text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub path: String,
    pub line: usize,
}

/// Trait for framework-specific failure text conventions
pub trait FailureLocator: Send + Sync {
    /// Name used to select this locator from configuration
    fn name(&self) -> &str;

    /// Extract the location exactly as embedded in `text`, or `None` if the
    /// text does not follow this locator's convention.
    fn locate(&self, text: &str) -> Option<SourceLocation>;
}

/// Names accepted in `annotations.locators`
pub const BUILTIN_LOCATORS: &[&str] = &["minitest"];

/// Ordered set of locators plus the directory matches are made relative to
pub struct LocatorChain {
    locators: Vec<Box<dyn FailureLocator>>,
    workdir: PathBuf,
}

impl LocatorChain {
    /// Chain with every built-in locator
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            locators: vec![Box::new(MinitestLocator::new())],
            workdir: workdir.into(),
        }
    }

    /// Create a chain with custom locators
    pub fn with_locators(locators: Vec<Box<dyn FailureLocator>>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            locators,
            workdir: workdir.into(),
        }
    }

    /// Build a chain from locator names, in the given order.
    pub fn from_names(names: &[String], workdir: impl Into<PathBuf>) -> Result<Self, AnnotateError> {
        let mut locators: Vec<Box<dyn FailureLocator>> = Vec::with_capacity(names.len());
        for name in names {
            match name.as_str() {
                "minitest" => locators.push(Box::new(MinitestLocator::new())),
                other => {
                    return Err(AnnotateError::Config(format!(
                        "unknown failure locator `{}` (expected one of: {})",
                        other,
                        BUILTIN_LOCATORS.join(", ")
                    )))
                }
            }
        }
        Ok(Self::with_locators(locators, workdir))
    }

    /// Names of the locators in this chain, in try order
    pub fn names(&self) -> Vec<&str> {
        self.locators.iter().map(|l| l.name()).collect()
    }

    /// Try each locator in order; the first match wins and its path is made
    /// relative to the working directory.
    pub fn locate(&self, text: &str) -> Option<SourceLocation> {
        let found = self.locators.iter().find_map(|l| l.locate(text))?;
        let path = relative_path(Path::new(&found.path), &self.workdir);
        Some(SourceLocation {
            path: path.to_string_lossy().into_owned(),
            line: found.line,
        })
    }
}

/// Lexical relative path from `base` to `target`.
///
/// Mirrors Node's `path.relative`: nothing touches the filesystem, and a
/// target outside `base` yields leading `..` segments. A relative `target`
/// is returned unchanged.
pub fn relative_path(target: &Path, base: &Path) -> PathBuf {
    if !target.is_absolute() {
        return target.to_path_buf();
    }

    let target = normalize(target);
    let base = normalize(base);
    let common = target
        .iter()
        .zip(base.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..base.len() {
        rel.push("..");
    }
    for part in &target[common..] {
        rel.push(part);
    }
    rel
}

fn normalize(path: &Path) -> Vec<Component<'_>> {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(parts.last(), Some(Component::Normal(_))) {
                    parts.pop();
                }
            }
            other => parts.push(other),
        }
    }
    parts
}
