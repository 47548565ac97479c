//! Refcheck CLI - A git commit-msg hook for issue references
//!
//! Refcheck rejects commit messages that do not reference an issue
//! (`fixes #N`, `closes #N`, or `refs #N`). Git invokes the installed
//! hook with the path to the proposed message; the exit status decides
//! whether the commit proceeds.

pub mod domain;
pub mod cli;

pub use domain::{IssueRef, Keyword, MessageError};
