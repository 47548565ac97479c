//! Domain logic for Refcheck
//!
//! Contains the acceptance pattern and message validation without any
//! I/O concerns.

mod message;

pub use message::{find_issue_ref, validate, IssueRef, Keyword, MessageError};
