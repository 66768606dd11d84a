//! Failed login bookkeeping

use serde::{Deserialize, Serialize};

/// Failed login attempt counter
///
/// `timestamp` is the epoch milliseconds of the last failed attempt, 0 when
/// the counter has been reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginAttempts {
    pub count: u32,
    pub timestamp: i64,
}

impl LoginAttempts {
    pub fn reset() -> Self {
        Self::default()
    }

    /// Counter after one more failed attempt at `now_ms`
    pub fn recorded(&self, now_ms: i64) -> Self {
        Self {
            count: self.count.saturating_add(1),
            timestamp: now_ms,
        }
    }
}
