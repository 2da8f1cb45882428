//! # regexplore-core
//!
//! The engine behind interactive pattern authoring.
//!
//! The crate is a handful of pure functions over strings:
//!
//! - [`tokenize`](tokenizing::tokenize) splits a pattern into typed tokens for breakdown display.
//! - [`classify_whole_span`](classifying::classify_whole_span) recognizes an isolated selection
//!   (an IP, a date, a status code...) and returns an abstract fragment for it.
//! - [`generalize`](generalizing::generalize) greedily segments arbitrary text and abstracts every
//!   recognizable run, falling back to escaped single characters.
//! - [`execute`](matching::execute) compiles the pattern buffer, runs it against sample text and
//!   reports matches, captures and line numbers; [`highlight`](matching::highlight) partitions
//!   the sample text into matched and unmatched spans.
//!
//! Data flow for the authoring loop:
//!
//! selection -> classify_whole_span -> (fallback) generalize -> pattern buffer
//!           -> tokenize (breakdown) -> execute -> highlight
//!
//! Nothing here holds state between calls. Debouncing keystrokes is the caller's business.

pub mod classifying;
pub mod error;
pub mod generalizing;
pub mod matching;
pub mod tokenizing;

pub use classifying::{catalogue, classify_whole_span, Classifier};
pub use error::PatternError;
pub use generalizing::{fragment_for_selection, generalize, wrap_named};
pub use matching::{execute, highlight, Flags, HighlightSpan, MatchBudget, MatchRecord};
pub use tokenizing::{tokenize, Token, TokenKind};
