//! Commit message validation
//!
//! A message is accepted when it contains an issue reference anywhere
//! in its text:
//! - `fixes #42`
//! - `closes #7`
//! - `refs #123`
//!
//! Matching is case-sensitive, requires exactly one space between the
//! keyword and the `#`, and at least one digit after it. The search is
//! a substring search: text before or after the reference is ignored,
//! and the first match decides.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Pattern a message must contain to be accepted.
/// Group 1 captures the keyword, group 2 the issue number.
static ISSUE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(fixes|closes|refs) #(\d+)").unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessageError {
    /// The expected rejection path: the message never references an issue.
    /// Displays as the diagnostic line the hook prints back to the committer.
    #[error("Bad commit message {0}")]
    MissingIssueRef(String),
}

/// Keyword that introduces an issue reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Fixes,
    Closes,
    Refs,
}

impl Keyword {
    /// Returns the keyword as it appears in a message
    pub fn label(&self) -> &'static str {
        match self {
            Keyword::Fixes => "fixes",
            Keyword::Closes => "closes",
            Keyword::Refs => "refs",
        }
    }

    fn from_capture(s: &str) -> Self {
        match s {
            "fixes" => Keyword::Fixes,
            "closes" => Keyword::Closes,
            "refs" => Keyword::Refs,
            other => unreachable!("keyword capture: {other}"),
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The first issue reference found in a commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRef {
    /// Which keyword introduced the reference
    pub keyword: Keyword,
    /// The referenced issue number, as written (digits only)
    pub number: String,
}

impl fmt::Display for IssueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.keyword, self.number)
    }
}

/// Searches a message for its first issue reference
///
/// The number is kept as text so that digit runs beyond integer range
/// still count as a match.
pub fn find_issue_ref(message: &str) -> Option<IssueRef> {
    let caps = ISSUE_REF.captures(message)?;
    Some(IssueRef {
        keyword: Keyword::from_capture(&caps[1]),
        number: caps[2].to_string(),
    })
}

/// Validates a commit message
///
/// Returns the matched reference, or the rejection carrying the
/// offending text.
pub fn validate(message: &str) -> Result<IssueRef, MessageError> {
    find_issue_ref(message).ok_or_else(|| MessageError::MissingIssueRef(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_fixes_reference() {
        let found = find_issue_ref("fixes #42").unwrap();
        assert_eq!(found.keyword, Keyword::Fixes);
        assert_eq!(found.number, "42");
    }

    #[test]
    fn accepts_reference_inside_longer_message() {
        let msg = "implement feature X\n\nfixes #42";
        assert!(find_issue_ref(msg).is_some());
    }

    #[test]
    fn first_match_wins() {
        let found = find_issue_ref("closes #7 and refs #9").unwrap();
        assert_eq!(found.keyword, Keyword::Closes);
        assert_eq!(found.number, "7");
    }

    #[test]
    fn rejects_message_without_reference() {
        assert_eq!(
            validate("implement feature X"),
            Err(MessageError::MissingIssueRef(
                "implement feature X".to_string()
            ))
        );
    }

    #[test]
    fn keyword_match_is_case_sensitive() {
        assert!(find_issue_ref("Fixes #5").is_none());
        assert!(find_issue_ref("CLOSES #5").is_none());
    }

    #[test]
    fn requires_single_space_before_hash() {
        assert!(find_issue_ref("refs#5").is_none());
        assert!(find_issue_ref("refs  #5").is_none());
        assert!(find_issue_ref("refs\t#5").is_none());
    }

    #[test]
    fn requires_at_least_one_digit() {
        assert!(find_issue_ref("refs #").is_none());
        assert!(find_issue_ref("refs #x").is_none());
    }

    #[test]
    fn search_has_no_word_boundary() {
        // "prefixes #12" contains "fixes #12" and is therefore accepted
        let found = find_issue_ref("prefixes #12").unwrap();
        assert_eq!(found.keyword, Keyword::Fixes);
    }

    #[test]
    fn long_digit_runs_still_match() {
        let found = find_issue_ref("refs #99999999999999999999999").unwrap();
        assert_eq!(found.number, "99999999999999999999999");
    }

    #[test]
    fn rejection_names_the_offending_text() {
        let err = validate("no reference here").unwrap_err();
        assert_eq!(err.to_string(), "Bad commit message no reference here");
    }

    #[test]
    fn issue_ref_displays_as_written() {
        let found = find_issue_ref("tidy parser, closes #19").unwrap();
        assert_eq!(found.to_string(), "closes #19");
    }

    proptest! {
        #[test]
        fn any_surrounding_text_is_accepted(
            prefix in "[ -~]{0,40}",
            suffix in "[ -~]{0,40}",
            number in 0u32..1_000_000,
        ) {
            let msg = format!("{prefix}\nfixes #{number}\n{suffix}");
            prop_assert!(find_issue_ref(&msg).is_some());
        }

        #[test]
        fn text_that_cannot_spell_a_keyword_is_rejected(
            // keywords are lowercase, so an uppercase-only alphabet never matches
            msg in "[A-Z0-9 #.,!?\n]{0,200}",
        ) {
            prop_assert!(find_issue_ref(&msg).is_none());
        }
    }
}
