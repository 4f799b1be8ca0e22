//! Error types for log4scan.

use thiserror::Error;

/// Result type alias using the log4scan [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while assembling a matcher or reporter.
///
/// None of these can occur while collecting a finding; they are all
/// detected once, when the rule table and configuration are combined.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("rule table is empty")]
    EmptyRuleTable,

    #[error("rule table lists {cve} more than once")]
    DuplicateRule { cve: String },

    #[error("cannot disable {cve}: no rule in the table matches it")]
    UnknownCve { cve: String },

    #[error("unknown output mode: {0}. Use 'json', 'path' or 'human'")]
    UnknownOutputMode(String),

    #[error("unknown finding key: {0}")]
    UnknownFinding(String),
}
