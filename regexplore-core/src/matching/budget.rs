//! Execution bounds for user-controlled patterns
//!
//! The `regex` engine runs in linear time, so there is no catastrophic backtracking to
//! defend against. What can still blow up is the size of the compiled program (large
//! counted repetitions of Unicode classes) and the number of matches a permissive pattern
//! finds in a long sample. Both are capped here.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Limits applied while compiling and scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchBudget {
    /// Wall time allowed for the whole scan loop
    pub time_limit: Duration,
    /// Matches collected before giving up
    pub max_matches: usize,
    /// Compiled program size, in bytes
    pub size_limit: usize,
}

impl MatchBudget {
    pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_millis(250);
    pub const DEFAULT_MAX_MATCHES: usize = 10_000;
    pub const DEFAULT_SIZE_LIMIT: usize = 2 * (1 << 20);

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn with_max_matches(mut self, max_matches: usize) -> Self {
        self.max_matches = max_matches;
        self
    }

    pub fn with_size_limit(mut self, size_limit: usize) -> Self {
        self.size_limit = size_limit;
        self
    }
}

impl Default for MatchBudget {
    fn default() -> Self {
        MatchBudget {
            time_limit: Self::DEFAULT_TIME_LIMIT,
            max_matches: Self::DEFAULT_MAX_MATCHES,
            size_limit: Self::DEFAULT_SIZE_LIMIT,
        }
    }
}
