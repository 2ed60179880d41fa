//! GitHub Actions workflow command output format
//!
//! Produces `::error::` and `::notice::` lines that the runner turns into
//! step failures and log annotations.
//!
//! See: https://docs.github.com/en/actions/using-workflows/workflow-commands-for-github-actions

/// Format a workflow command with an escaped message.
pub fn format_command(command: &str, message: &str) -> String {
    format!("::{}::{}", command, escape_data(message))
}

/// `::error::{message}`, the failure reason shown for the step
pub fn error(message: &str) -> String {
    format_command("error", message)
}

/// `::notice::{message}`
pub fn notice(message: &str) -> String {
    format_command("notice", message)
}

/// Workflow command data must not contain raw `%`, CR, or LF.
fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
