//! junit-annotate core - JUnit report aggregation engine
//!
//! This crate turns JUnit XML reports into check-run annotations:
//! - Report parsing into a uniform record model
//! - Aggregation of counts, durations, and failing cases across reports
//! - Failure location recovery from framework-specific failure text
//! - Capped, ordered annotation sets with a run summary
//! - The check-run publish contract (transport supplied by the caller)

pub mod aggregate;
pub mod annotation;
pub mod config;
pub mod discovery;
pub mod error;
pub mod locator;
pub mod publish;
pub mod report;

pub use aggregate::{aggregate_documents, AggregateResult, FailingCase, ReportOrigin};
pub use annotation::{
    Annotation, AnnotationBuilder, AnnotationLevel, AnnotationSet, LocatedFailure, CHECK_TITLE,
};
pub use config::AnnotateConfig;
pub use discovery::{discover_reports, read_documents, RawDocument};
pub use error::AnnotateError;
pub use locator::{FailureLocator, LocatorChain, MinitestLocator, SourceLocation};
pub use publish::{publish, CheckRun, CheckRunClient, CheckRunOutput, PublishOutcome};
pub use report::{parse_report, ReportRecord, TestCaseRecord, TestStatus, XmlError};

/// junit-annotate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
