//! Repository and gateway trait definitions
//!
//! Both traits are object safe and `Send + Sync` so services can hold them as
//! `Arc<dyn _>` and be moved onto a worker thread.

use rts_types::Error;

use crate::model::{
    AuthReply, AuthRequest, GatewayReply, LinkOpenedNotice, LoginAttempts, SubmissionPayload,
};

/// Storage for the failed login counter
pub trait LoginAttemptRepository: Send + Sync {
    /// Load the counter; a missing record is the reset counter
    fn load(&self) -> Result<LoginAttempts, Error>;

    /// Replace the stored counter
    fn save(&self, attempts: &LoginAttempts) -> Result<(), Error>;
}

/// Remote workflow service reached over HTTP
///
/// Implementations return `Err` only for transport or decoding failures; any
/// HTTP status the service answers with is reported in the reply.
pub trait WorkflowGateway: Send + Sync {
    /// Check credentials
    fn authenticate(&self, request: &AuthRequest) -> Result<AuthReply, Error>;

    /// Deliver the confirmed order batch
    fn submit_orders(&self, payload: &SubmissionPayload) -> Result<GatewayReply, Error>;

    /// Tell the workflow that a dispatcher opened an order link
    fn notify_link_opened(&self, notice: &LinkOpenedNotice) -> Result<GatewayReply, Error>;
}
