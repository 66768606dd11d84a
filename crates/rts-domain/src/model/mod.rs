//! Domain model types

pub mod login_attempts;
pub mod order;
pub mod time_slot;
pub mod wagon;
pub mod workflow;

pub use login_attempts::LoginAttempts;
pub use order::{Order, OrderConfirmation};
pub use time_slot::TimeSlot;
pub use wagon::{WagonProfile, WagonType};
pub use workflow::{AuthReply, AuthRequest, GatewayReply, LinkOpenedNotice, SubmissionPayload};
