//! CLI commands

pub mod annotate;
