//! Errors reported by selector-matching engines

use thiserror::Error;

/// Failure of a [`Matcher`](crate::infrastructure::traits::Matcher) to evaluate a selector.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("invalid selector syntax '{selector}': {reason}")]
    Syntax { selector: String, reason: String },

    #[error("cannot evaluate selector '{selector}': {reason}")]
    Evaluation { selector: String, reason: String },
}

impl MatchError {
    pub fn syntax(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Syntax {
            selector: selector.into(),
            reason: reason.into(),
        }
    }

    pub fn evaluation(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Evaluation {
            selector: selector.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for matching engines.
pub type MatchResult<T> = Result<T, MatchError>;
