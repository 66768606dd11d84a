//! Order link handling
//!
//! A link may be pasted as a full URL, as its query string, or as the bare
//! `data` value. The query is form-decoded once, the way a browser reads
//! its location; the decoder deals with whatever encoding is left.

use tracing::debug;
use url::{form_urlencoded, Url};

use rts_domain::model::Order;
use rts_domain::service::orders_from_data;

/// Query parameter carrying the order payload
pub const DATA_PARAM: &str = "data";

/// Extract the raw `data` value from a pasted link
pub fn data_param(link: &str) -> Option<String> {
    let link = link.trim();
    if link.is_empty() {
        return None;
    }

    if link.contains("://") {
        let url = match Url::parse(link) {
            Ok(url) => url,
            Err(e) => {
                debug!("link is not a valid URL: {}", e);
                return None;
            }
        };
        return url
            .query_pairs()
            .find(|(key, _)| key == DATA_PARAM)
            .map(|(_, value)| value.into_owned());
    }

    let query = link.strip_prefix('?').unwrap_or(link);
    if query.starts_with("data=") || query.contains("&data=") {
        return form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == DATA_PARAM)
            .map(|(_, value)| value.into_owned());
    }

    Some(link.to_string())
}

/// Decode and normalize the orders carried by a link
pub fn orders_from_link(link: &str) -> Vec<Order> {
    let orders = orders_from_data(data_param(link).as_deref());
    debug!("link carried {} orders", orders.len());
    orders
}
