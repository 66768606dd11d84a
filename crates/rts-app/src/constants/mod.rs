//! Static option tables for the order form

pub mod reasons;

pub use reasons::{ReasonOption, NO_REASON, REASONS};
