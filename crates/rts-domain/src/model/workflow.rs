//! Request and response shapes exchanged with the workflow service

use serde::{Deserialize, Serialize};

use super::OrderConfirmation;

/// Body posted to the authentication endpoint
#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
    /// RFC 3339 UTC
    pub timestamp: String,
}

/// Parsed reply of the authentication endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthReply {
    #[serde(skip)]
    pub status: u16,
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub token: Option<String>,
}

impl AuthReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status) && self.authenticated
    }
}

/// Body posted to the order submission endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    /// RFC 3339 UTC
    pub submission_timestamp: String,
    pub session_token: Option<String>,
    pub orders: Vec<OrderConfirmation>,
}

/// Body posted when a dispatcher opens an order link
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkOpenedNotice {
    pub order_ids: Vec<String>,
    /// RFC 3339 UTC
    pub opened_at: String,
}

/// Raw HTTP outcome of a fire-and-forget or submission call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayReply {
    pub status: u16,
    pub body: String,
}

impl GatewayReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
