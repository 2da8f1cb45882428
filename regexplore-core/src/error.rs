//! Error types for pattern compilation and execution
//!
//! Tokenizing and generalizing are total and never produce these; only the
//! matcher (and capture-name validation) can fail.

use std::fmt;

/// Everything that can go wrong while turning a pattern buffer into matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern is not syntactically valid; carries the engine diagnostic verbatim
    Compile { message: String },
    /// Compilation or scanning ran past the configured budget
    BudgetExceeded { reason: String },
    /// A capture name that the pattern dialect would reject
    InvalidName { name: String },
    /// A flag letter outside `gims`
    InvalidFlag { flag: char },
}

impl PatternError {
    pub fn compile(message: impl Into<String>) -> Self {
        PatternError::Compile {
            message: message.into(),
        }
    }

    pub fn budget(reason: impl Into<String>) -> Self {
        PatternError::BudgetExceeded {
            reason: reason.into(),
        }
    }

    /// True when the caller should warn about an expensive pattern rather than report a typo
    pub fn is_budget(&self) -> bool {
        matches!(self, PatternError::BudgetExceeded { .. })
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::Compile { message } => write!(f, "Invalid pattern: {}", message),
            PatternError::BudgetExceeded { reason } => {
                write!(f, "Matching budget exceeded: {}", reason)
            }
            PatternError::InvalidName { name } => {
                write!(f, "Invalid capture name '{}'", name)
            }
            PatternError::InvalidFlag { flag } => {
                write!(f, "Unknown flag '{}' (expected any of g, i, m, s)", flag)
            }
        }
    }
}

impl std::error::Error for PatternError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keeps_engine_message() {
        let err = PatternError::compile("unclosed group");
        assert_eq!(err.to_string(), "Invalid pattern: unclosed group");
        assert!(!err.is_budget());
    }

    #[test]
    fn test_flag_error_names_the_flag() {
        let err = PatternError::InvalidFlag { flag: 'x' };
        assert_eq!(
            err.to_string(),
            "Unknown flag 'x' (expected any of g, i, m, s)"
        );
    }

    #[test]
    fn test_budget_is_distinct() {
        let err = PatternError::budget("too many matches");
        assert!(err.is_budget());
        assert_eq!(
            err.to_string(),
            "Matching budget exceeded: too many matches"
        );
    }
}
