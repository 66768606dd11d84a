//! Domain services

pub mod dates;
pub mod decoder;
pub mod normalizer;
pub mod throttle;
pub mod time_slots;
pub mod validation;

pub use dates::convert_date_to_iso;
pub use decoder::{decode_url_data, decode_with, PayloadEncoding};
pub use normalizer::{normalize_order, orders_from_data, parse_orders};
pub use throttle::{LoginThrottle, ThrottleDecision};
pub use time_slots::generate_time_slots;
pub use validation::{validate_orders, ValidationReport};
