//! Order type definitions

use serde::{Deserialize, Serialize};

/// Placeholder shown for missing descriptive fields
pub const NOT_AVAILABLE: &str = "N/A";

/// Connector between departure and destination in the route label
pub const ROUTE_CONNECTOR: &str = "nach";

/// Normalized transport order decoded from a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Bestell-ID
    pub order_id: String,
    /// Lieferant
    pub supplier: String,
    /// Kalenderwoche
    pub cw: String,
    /// Requested wagon count
    pub wagons: u32,
    /// Transportdatum as received (usually DD.MM.YYYY)
    pub transport_date: String,
    /// Lieferdatum as received
    pub delivery_date: String,
    pub wagon_profile: String,
    pub wagon_type: String,
    pub departure: String,
    pub destination: String,
    /// "{departure} nach {destination}"
    pub route: String,
}

impl Order {
    /// Build the display route from departure and destination
    pub fn route_label(departure: &str, destination: &str) -> String {
        format!("{} {} {}", departure, ROUTE_CONNECTOR, destination)
    }
}

/// Dispatcher-confirmed order as sent to the workflow endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: String,
    pub wagons: u32,
    /// YYYY-MM-DD
    pub transport_date: String,
    /// YYYY-MM-DD
    pub delivery_date: String,
    pub wagon_profile: String,
    pub wagon_type: String,
    /// 2h arrival window at the departure station
    pub departure_arrival_slot: String,
    /// 15min departure time at the departure station
    pub departure_time: String,
    /// 2h arrival window at the destination station
    pub destination_arrival_slot: String,
    /// 15min departure time at the destination station
    pub destination_departure_time: String,
    /// Display text of the selected underdelivery reason
    pub reason_underdelivery: String,
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_label() {
        assert_eq!(Order::route_label("Linz", "Graz"), "Linz nach Graz");
    }

    #[test]
    fn test_confirmation_serializes_camel_case() {
        let confirmation = OrderConfirmation {
            order_id: "A1".to_string(),
            wagons: 2,
            departure_arrival_slot: "06:00 - 08:00".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&confirmation).unwrap();
        assert_eq!(json["orderId"], "A1");
        assert_eq!(json["departureArrivalSlot"], "06:00 - 08:00");
        assert!(json.get("reasonUnderdelivery").is_some());
    }
}
