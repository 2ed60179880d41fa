//! Output formats and the GitHub transport

pub mod checks;
pub mod json;
pub mod terminal;
pub mod workflow;
