//! Login attempt throttling
//!
//! A login is refused locally once `max_attempts` failures have piled up and
//! the last one is younger than the window. The counter starts over as soon
//! as the window has elapsed since the last failure.

use chrono::{DateTime, Duration, Utc};

use crate::model::LoginAttempts;

/// Throttle policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginThrottle {
    pub max_attempts: u32,
    pub window: Duration,
}

/// Result of checking the throttle before a login
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleDecision {
    /// Login may proceed; `attempts` is the (possibly reset) counter to keep
    Allowed { attempts: LoginAttempts, was_reset: bool },
    /// Too many failures; retry after this many whole minutes
    Locked { retry_after_minutes: i64 },
}

impl Default for LoginThrottle {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window: Duration::minutes(15),
        }
    }
}

impl LoginThrottle {
    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
        }
    }

    /// Decide whether a login may proceed at `now`
    pub fn check(&self, attempts: LoginAttempts, now: DateTime<Utc>) -> ThrottleDecision {
        let window_ms = self.window.num_milliseconds().max(0);
        let now_ms = now.timestamp_millis();
        let elapsed_ms = now_ms.saturating_sub(attempts.timestamp);
        // a last attempt stamped after `now` comes from a clock that moved back
        if elapsed_ms > window_ms || attempts.timestamp > now_ms {
            let was_reset = attempts != LoginAttempts::reset();
            return ThrottleDecision::Allowed {
                attempts: LoginAttempts::reset(),
                was_reset,
            };
        }

        if attempts.count >= self.max_attempts {
            let remaining_ms = window_ms.saturating_sub(elapsed_ms).clamp(0, window_ms);
            let minutes = remaining_ms / 60_000 + i64::from(remaining_ms % 60_000 != 0);
            return ThrottleDecision::Locked {
                retry_after_minutes: minutes.max(1),
            };
        }

        ThrottleDecision::Allowed {
            attempts,
            was_reset: false,
        }
    }

    /// User-facing message for a locked throttle
    pub fn locked_message(retry_after_minutes: i64) -> String {
        format!(
            "Zu viele fehlgeschlagene Anmeldeversuche. Bitte warten Sie {} Minuten.",
            retry_after_minutes
        )
    }
}
