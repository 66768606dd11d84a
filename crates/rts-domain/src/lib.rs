//! Domain layer for rail transport order confirmation
//!
//! Order model, link payload decoding, order normalization, validation and
//! the login throttle. Everything here is pure; persistence and network
//! access sit behind the traits in [`repository`].

pub mod model;
pub mod repository;
pub mod service;
