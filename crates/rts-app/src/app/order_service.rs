//! Order batch submission and link-opened notification

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use rts_domain::model::{LinkOpenedNotice, Order, OrderConfirmation, SubmissionPayload};
use rts_domain::repository::WorkflowGateway;
use rts_domain::service::validate_orders;

use super::wire_timestamp;

pub const MSG_SUBMIT_OK: &str =
    "Alle Transportaufträge wurden erfolgreich bestätigt und an die Logistik gesendet.";
pub const MSG_SUBMIT_ERROR: &str =
    "Ein Fehler ist aufgetreten. Bitte prüfen Sie Ihre Verbindung oder wenden Sie sich an den Support.";

/// User-facing result of a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub success: bool,
    pub message: String,
}

impl SubmitOutcome {
    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

pub struct OrderService {
    gateway: Arc<dyn WorkflowGateway>,
}

impl OrderService {
    pub fn new(gateway: Arc<dyn WorkflowGateway>) -> Self {
        Self { gateway }
    }

    pub fn submit(&self, orders: &[OrderConfirmation], session_token: Option<&str>) -> SubmitOutcome {
        self.submit_at(orders, session_token, Utc::now())
    }

    /// Validate and send the batch; never fails, every problem becomes a message
    pub fn submit_at(
        &self,
        orders: &[OrderConfirmation],
        session_token: Option<&str>,
        now: DateTime<Utc>,
    ) -> SubmitOutcome {
        let report = validate_orders(orders);
        if !report.valid {
            info!("Submission blocked by {} validation errors", report.errors.len());
            return SubmitOutcome::failed(format!("Validierungsfehler: {}", report.summary()));
        }

        let payload = SubmissionPayload {
            submission_timestamp: wire_timestamp(now),
            session_token: session_token.map(str::to_string),
            orders: orders.to_vec(),
        };

        match self.gateway.submit_orders(&payload) {
            Ok(reply) if reply.is_success() => {
                info!("Submitted {} orders (HTTP {})", orders.len(), reply.status);
                SubmitOutcome {
                    success: true,
                    message: MSG_SUBMIT_OK.to_string(),
                }
            }
            Ok(reply) => {
                warn!("Submission rejected with HTTP {}", reply.status);
                SubmitOutcome::failed(format!(
                    "Übermittlung fehlgeschlagen. Server-Status: {}. {}",
                    reply.status, reply.body
                ))
            }
            Err(e) => {
                warn!("Submission failed: {}", e);
                SubmitOutcome::failed(MSG_SUBMIT_ERROR)
            }
        }
    }

    pub fn notify_link_opened(&self, orders: &[Order]) {
        self.notify_link_opened_at(orders, Utc::now());
    }

    /// Report opened orders; failures are only logged
    pub fn notify_link_opened_at(&self, orders: &[Order], now: DateTime<Utc>) {
        if orders.is_empty() {
            return;
        }
        let notice = LinkOpenedNotice {
            order_ids: orders.iter().map(|o| o.order_id.clone()).collect(),
            opened_at: wire_timestamp(now),
        };
        match self.gateway.notify_link_opened(&notice) {
            Ok(reply) if reply.is_success() => {
                info!("Link-opened notice sent for {} orders", notice.order_ids.len());
            }
            Ok(reply) => warn!("Link-opened notice rejected with HTTP {}", reply.status),
            Err(e) => warn!("Link-opened notice failed: {}", e),
        }
    }
}
