//! Stateful services used by the front ends

pub mod auth_service;
pub mod order_service;

pub use auth_service::{AuthOutcome, AuthService, AuthState};
pub use order_service::{OrderService, SubmitOutcome};

use chrono::{DateTime, SecondsFormat, Utc};

/// Timestamp format sent to the workflow service
pub(crate) fn wire_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}
