//! Commit message check
//!
//! This module implements the hook side of refcheck. Git calls the
//! installed commit-msg hook with one path: the file holding the
//! proposed commit message. A message that references an issue passes
//! silently; anything else is echoed back behind a rejection line and
//! the commit is aborted through the exit status.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::output::Output;
use crate::domain;

/// Hook result codes
pub const CHECK_PASS: i32 = 0;
pub const CHECK_FAIL: i32 = 1;

/// Runs the check
///
/// Git calls: refcheck check $1
/// - $1 = path to the commit message file (usually .git/COMMIT_EDITMSG)
pub fn run_check(message_path: &Path, output: &Output) -> Result<i32> {
    let message = read_message_file(message_path)?;

    match domain::validate(&message) {
        Ok(issue_ref) => {
            output.verbose_ctx("check", &format!("matched {}", issue_ref));
            Ok(CHECK_PASS)
        }
        Err(rejection) => {
            if output.is_json() {
                output.data(&serde_json::json!({
                    "accepted": false,
                    "message": message,
                }));
            } else {
                println!("{}", rejection);
            }
            Ok(CHECK_FAIL)
        }
    }
}

/// Reads the commit message from the file git hands to the hook
///
/// Non-UTF-8 content surfaces as the read error.
fn read_message_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read commit message file: {}", path.display()))
}
