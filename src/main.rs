//! Refcheck CLI - Issue-reference enforcement for git commit messages

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = refcheck_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
