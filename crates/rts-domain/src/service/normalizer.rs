//! Order normalization
//!
//! Upstream exports disagree on key casing (`OrderID` vs `orderId`,
//! `Transportdatum` vs `transportDate`). Every field is looked up through a
//! list of aliases and missing values fall back to defaults, so
//! normalization itself cannot fail.

use serde_json::Value;
use tracing::warn;

use rts_types::{Error, Result};

use crate::model::order::NOT_AVAILABLE;
use crate::model::Order;
use crate::service::decoder::decode_url_data;

const ORDER_ID_KEYS: &[&str] = &["OrderID", "orderId"];
const SUPPLIER_KEYS: &[&str] = &["SupplierName", "supplier"];
const CW_KEYS: &[&str] = &["CW", "cw"];
const WAGONS_KEYS: &[&str] = &["RequiredWagons", "wagons"];
const TRANSPORT_DATE_KEYS: &[&str] = &["Transportdatum", "transportDate"];
const DELIVERY_DATE_KEYS: &[&str] = &["deliveryDate", "DeliveryDate"];
const PROFILE_KEYS: &[&str] = &["WagonProfile", "wagonProfile"];
const TYPE_KEYS: &[&str] = &["WagonType", "wagonType"];
const DEPARTURE_KEYS: &[&str] = &["Departure", "departure"];
const DESTINATION_KEYS: &[&str] = &["Destination", "destination"];

/// Wagon count used when the record carries none
pub const DEFAULT_WAGONS: u32 = 1;

/// Map a raw order record onto the canonical [`Order`]
pub fn normalize_order(raw: &Value) -> Order {
    let departure = text_field(raw, DEPARTURE_KEYS).unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let destination =
        text_field(raw, DESTINATION_KEYS).unwrap_or_else(|| NOT_AVAILABLE.to_string());

    Order {
        order_id: text_field(raw, ORDER_ID_KEYS).unwrap_or_default(),
        supplier: text_field(raw, SUPPLIER_KEYS).unwrap_or_default(),
        cw: text_field(raw, CW_KEYS).unwrap_or_default(),
        wagons: wagons_field(raw).unwrap_or(DEFAULT_WAGONS),
        transport_date: text_field(raw, TRANSPORT_DATE_KEYS)
            .map(|d| d.trim().to_string())
            .unwrap_or_default(),
        delivery_date: text_field(raw, DELIVERY_DATE_KEYS)
            .map(|d| d.trim().to_string())
            .unwrap_or_default(),
        wagon_profile: text_field(raw, PROFILE_KEYS).unwrap_or_default(),
        wagon_type: text_field(raw, TYPE_KEYS).unwrap_or_default(),
        route: Order::route_label(&departure, &destination),
        departure,
        destination,
    }
}

/// Parse decoded link text into normalized orders
///
/// Accepts either a JSON array of records or a single record.
pub fn parse_orders(json: &str) -> Result<Vec<Order>> {
    let parsed: Value = serde_json::from_str(json)?;
    match parsed {
        Value::Array(items) => Ok(items.iter().map(normalize_order).collect()),
        Value::Object(_) => Ok(vec![normalize_order(&parsed)]),
        other => Err(Error::InvalidInput(format!(
            "expected order object or array, got {}",
            json_kind(&other)
        ))),
    }
}

/// Decode and normalize the `data` parameter of an order link
///
/// Any failure degrades to an empty order list.
pub fn orders_from_data(encoded: Option<&str>) -> Vec<Order> {
    let Some(json) = decode_url_data(encoded) else {
        return Vec::new();
    };
    match parse_orders(&json) {
        Ok(orders) => orders,
        Err(e) => {
            warn!("Error parsing order data: {}", e);
            Vec::new()
        }
    }
}

/// First alias holding a usable value, rendered as text
fn text_field(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match raw.get(*key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    })
}

fn wagons_field(raw: &Value) -> Option<u32> {
    WAGONS_KEYS.iter().find_map(|key| {
        let count = match raw.get(*key)? {
            Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f as u64))?,
            Value::String(s) => s.trim().parse::<u64>().ok()?,
            _ => return None,
        };
        u32::try_from(count).ok().filter(|c| *c >= 1)
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
