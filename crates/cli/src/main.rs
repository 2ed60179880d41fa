//! junit-annotate CLI - JUnit results as check-run annotations

use clap::Parser;
use colored::Colorize;
use junit_annotate_cli::{commands, output::workflow, Cli};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::annotate::run(&cli) {
        let reason = format!("{:#}", e);
        eprintln!("  {}: {}", "error".red(), reason);
        // Marks the step as failed with this reason when run under Actions
        println!("{}", workflow::error(&reason));
        std::process::exit(1);
    }
}
