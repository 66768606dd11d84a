use serde::Deserialize;

use rts_domain::model::order::NOT_AVAILABLE;
use rts_domain::model::{Order, OrderConfirmation, TimeSlot, WagonProfile, WagonType};
use rts_domain::service::{convert_date_to_iso, generate_time_slots};
use rts_types::{Error, Result};

use crate::config::Config;
use crate::constants::REASONS;

/// Heading id shown for orders without an identifier
pub const UNKNOWN_ORDER_ID: &str = "UNKNOWN";

/// Comment length limit of the free-text field
pub const COMMENT_MAX_CHARS: usize = 500;

/// One entry of a select field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
}

/// Select field with exactly one selected option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectField {
    pub options: Vec<SelectOption>,
    pub selected: usize,
}

impl SelectField {
    /// Build a field preselecting `selected_value`, or the first option
    pub fn new(options: Vec<SelectOption>, selected_value: &str) -> Self {
        let selected = options
            .iter()
            .position(|o| o.value == selected_value)
            .unwrap_or(0);
        Self { options, selected }
    }

    pub fn from_slots(slots: &[TimeSlot]) -> Self {
        let options = slots
            .iter()
            .map(|s| SelectOption {
                value: s.value.clone(),
                text: s.text.clone(),
            })
            .collect();
        Self::new(options, "")
    }

    pub fn selected_option(&self) -> Option<&SelectOption> {
        self.options.get(self.selected)
    }

    pub fn selected_value(&self) -> &str {
        self.selected_option().map(|o| o.value.as_str()).unwrap_or("")
    }

    pub fn selected_text(&self) -> &str {
        self.selected_option().map(|o| o.text.as_str()).unwrap_or("")
    }

    /// Select the option with `value`; false when there is none
    pub fn select_value(&mut self, value: &str) -> bool {
        match self.options.iter().position(|o| o.value == value) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }
}

/// Time slot tables shared by all order groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOptions {
    /// Coarse arrival windows
    pub arrival_slots: Vec<TimeSlot>,
    /// Fine departure times
    pub departure_slots: Vec<TimeSlot>,
}

impl FormOptions {
    pub fn new(arrival_interval: u32, departure_interval: u32) -> Self {
        Self {
            arrival_slots: generate_time_slots(arrival_interval),
            departure_slots: generate_time_slots(departure_interval),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.time_slots.arrival_interval,
            config.time_slots.departure_interval,
        )
    }
}

/// Editable group for one order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderGroup {
    /// Identifier as received, possibly empty
    pub order_id: String,
    pub supplier: String,
    pub route: String,
    pub cw: String,
    pub departure: String,
    pub destination: String,

    pub wagons: u32,
    /// YYYY-MM-DD
    pub transport_date: String,
    /// YYYY-MM-DD
    pub delivery_date: String,
    pub profile: SelectField,
    pub wagon_type: SelectField,
    pub departure_arrival_slot: SelectField,
    pub departure_time: SelectField,
    pub destination_arrival_slot: SelectField,
    pub destination_departure_time: SelectField,
    pub reason: SelectField,
    pub comment: String,
}

fn or_not_available(value: &str) -> String {
    if value.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value.to_string()
    }
}

fn profile_field(current: &str) -> SelectField {
    let options = WagonProfile::ALL
        .iter()
        .map(|p| SelectOption {
            value: p.label().to_string(),
            text: p.label().to_string(),
        })
        .collect();
    let selected = WagonProfile::parse(current).map(|p| p.label()).unwrap_or("");
    SelectField::new(options, selected)
}

fn wagon_type_field(current: &str) -> SelectField {
    let options = WagonType::ALL
        .iter()
        .map(|t| SelectOption {
            value: t.label().to_string(),
            text: t.label().to_string(),
        })
        .collect();
    let selected = WagonType::parse(current).map(|t| t.label()).unwrap_or("");
    SelectField::new(options, selected)
}

fn reason_field() -> SelectField {
    let options = REASONS
        .iter()
        .map(|r| SelectOption {
            value: r.value.to_string(),
            text: r.text.to_string(),
        })
        .collect();
    SelectField::new(options, crate::constants::NO_REASON)
}

impl OrderGroup {
    /// Pre-populate a group from a normalized order
    pub fn from_order(order: &Order, options: &FormOptions) -> Self {
        Self {
            order_id: order.order_id.clone(),
            supplier: or_not_available(&order.supplier),
            route: or_not_available(&order.route),
            cw: or_not_available(&order.cw),
            departure: order.departure.clone(),
            destination: order.destination.clone(),
            wagons: order.wagons.max(1),
            transport_date: convert_date_to_iso(&order.transport_date),
            delivery_date: convert_date_to_iso(&order.delivery_date),
            profile: profile_field(&order.wagon_profile),
            wagon_type: wagon_type_field(&order.wagon_type),
            departure_arrival_slot: SelectField::from_slots(&options.arrival_slots),
            departure_time: SelectField::from_slots(&options.departure_slots),
            destination_arrival_slot: SelectField::from_slots(&options.arrival_slots),
            destination_departure_time: SelectField::from_slots(&options.departure_slots),
            reason: reason_field(),
            comment: String::new(),
        }
    }

    /// Identifier for headings and element ids
    pub fn display_id(&self) -> &str {
        if self.order_id.is_empty() {
            UNKNOWN_ORDER_ID
        } else {
            &self.order_id
        }
    }

    pub fn heading(&self) -> String {
        format!(
            "Order ID: {} | Supplier: {} | Route: {}",
            self.display_id(),
            self.supplier,
            self.route
        )
    }

    /// Collect the current values for submission
    pub fn to_confirmation(&self) -> OrderConfirmation {
        OrderConfirmation {
            order_id: self.order_id.clone(),
            wagons: self.wagons,
            transport_date: self.transport_date.trim().to_string(),
            delivery_date: self.delivery_date.trim().to_string(),
            wagon_profile: self.profile.selected_value().to_string(),
            wagon_type: self.wagon_type.selected_value().to_string(),
            departure_arrival_slot: self.departure_arrival_slot.selected_value().to_string(),
            departure_time: self.departure_time.selected_value().to_string(),
            destination_arrival_slot: self.destination_arrival_slot.selected_value().to_string(),
            destination_departure_time: self
                .destination_departure_time
                .selected_value()
                .to_string(),
            reason_underdelivery: self.reason.selected_text().to_string(),
            comment: self.comment.chars().take(COMMENT_MAX_CHARS).collect(),
        }
    }

    /// Apply dispatcher edits; select values must name existing options
    pub fn apply_edits(&mut self, edits: &OrderEdits) -> Result<()> {
        if let Some(wagons) = edits.wagons {
            self.wagons = wagons;
        }
        if let Some(ref date) = edits.transport_date {
            self.transport_date = convert_date_to_iso(date);
        }
        if let Some(ref date) = edits.delivery_date {
            self.delivery_date = convert_date_to_iso(date);
        }
        if let Some(ref comment) = edits.comment {
            self.comment = comment.chars().take(COMMENT_MAX_CHARS).collect();
        }

        let id = self.display_id().to_string();
        let selects = [
            (&edits.wagon_profile, &mut self.profile, "wagonProfile"),
            (&edits.wagon_type, &mut self.wagon_type, "wagonType"),
            (
                &edits.departure_arrival_slot,
                &mut self.departure_arrival_slot,
                "departureArrivalSlot",
            ),
            (&edits.departure_time, &mut self.departure_time, "departureTime"),
            (
                &edits.destination_arrival_slot,
                &mut self.destination_arrival_slot,
                "destinationArrivalSlot",
            ),
            (
                &edits.destination_departure_time,
                &mut self.destination_departure_time,
                "destinationDepartureTime",
            ),
            (&edits.reason, &mut self.reason, "reason"),
        ];
        for (value, field, name) in selects {
            if let Some(value) = value {
                if !field.select_value(value) {
                    return Err(Error::InvalidInput(format!(
                        "order {id}: '{value}' is not a valid {name}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Dispatcher edits for one order, as read from an edits file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrderEdits {
    pub wagons: Option<u32>,
    pub transport_date: Option<String>,
    pub delivery_date: Option<String>,
    pub wagon_profile: Option<String>,
    pub wagon_type: Option<String>,
    pub departure_arrival_slot: Option<String>,
    pub departure_time: Option<String>,
    pub destination_arrival_slot: Option<String>,
    pub destination_departure_time: Option<String>,
    /// Reason code, e.g. "32"
    pub reason: Option<String>,
    pub comment: Option<String>,
}

/// Notice shown when a link carried no usable orders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyNotice {
    pub title: &'static str,
    pub message: &'static str,
    pub hint: &'static str,
}

impl Default for EmptyNotice {
    fn default() -> Self {
        Self {
            title: "Fehler:",
            message: "Es wurden keine Bestelldaten übergeben oder die Daten konnten nicht geladen werden.",
            hint: "Bitte wenden Sie sich an das Logistik-Team oder überprüfen Sie den Link.",
        }
    }
}

/// The whole order form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormView {
    Orders(Vec<OrderGroup>),
    /// No orders; submission is disabled
    Empty(EmptyNotice),
}

impl FormView {
    pub fn build(orders: &[Order], options: &FormOptions) -> Self {
        if orders.is_empty() {
            return FormView::Empty(EmptyNotice::default());
        }
        FormView::Orders(
            orders
                .iter()
                .map(|order| OrderGroup::from_order(order, options))
                .collect(),
        )
    }

    pub fn can_submit(&self) -> bool {
        matches!(self, FormView::Orders(groups) if !groups.is_empty())
    }

    pub fn groups(&self) -> &[OrderGroup] {
        match self {
            FormView::Orders(groups) => groups,
            FormView::Empty(_) => &[],
        }
    }

    pub fn groups_mut(&mut self) -> &mut [OrderGroup] {
        match self {
            FormView::Orders(groups) => groups,
            FormView::Empty(_) => &mut [],
        }
    }

    pub fn confirmations(&self) -> Vec<OrderConfirmation> {
        self.groups().iter().map(OrderGroup::to_confirmation).collect()
    }

    /// Apply edits keyed by order id; unknown ids are an error
    pub fn apply_edits(
        &mut self,
        edits: &std::collections::BTreeMap<String, OrderEdits>,
    ) -> Result<()> {
        for (order_id, order_edits) in edits {
            let group = self
                .groups_mut()
                .iter_mut()
                .find(|g| &g.order_id == order_id)
                .ok_or_else(|| Error::InvalidInput(format!("no order with id {order_id}")))?;
            group.apply_edits(order_edits)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rts_domain::service::normalize_order;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn options() -> FormOptions {
        FormOptions::new(120, 15)
    }

    fn sample_order() -> Order {
        normalize_order(&json!({
            "OrderID": "A1",
            "SupplierName": "Holz GmbH",
            "CW": "12",
            "RequiredWagons": 3,
            "Transportdatum": "05.03.2024",
            "deliveryDate": "06.03.2024",
            "WagonProfile": "G2",
            "WagonType": "Geschlossen",
            "Departure": "Linz",
            "Destination": "Graz"
        }))
    }

    #[test]
    fn test_empty_orders_give_notice() {
        let view = FormView::build(&[], &options());
        assert!(matches!(view, FormView::Empty(_)));
        assert!(!view.can_submit());
        assert!(view.confirmations().is_empty());
    }

    #[test]
    fn test_group_prepopulated() {
        let view = FormView::build(&[sample_order()], &options());
        assert!(view.can_submit());
        let group = &view.groups()[0];
        assert_eq!(group.heading(), "Order ID: A1 | Supplier: Holz GmbH | Route: Linz nach Graz");
        assert_eq!(group.wagons, 3);
        assert_eq!(group.transport_date, "2024-03-05");
        assert_eq!(group.delivery_date, "2024-03-06");
        assert_eq!(group.profile.selected_value(), "G2");
        assert_eq!(group.wagon_type.selected_value(), "Geschlossen");
        assert_eq!(group.departure_arrival_slot.options.len(), 12);
        assert_eq!(group.departure_time.options.len(), 96);
        assert_eq!(group.reason.selected_value(), "None");
    }

    #[test]
    fn test_unknown_profile_selects_first() {
        let order = normalize_order(&json!({"OrderID": "B", "WagonProfile": "G9"}));
        let group = OrderGroup::from_order(&order, &options());
        assert_eq!(group.profile.selected_value(), "G1");
        assert_eq!(group.wagon_type.selected_value(), "Offen");
        assert_eq!(group.supplier, "N/A");
        assert_eq!(group.cw, "N/A");
    }

    #[test]
    fn test_missing_id_displays_unknown_but_submits_empty() {
        let order = normalize_order(&json!({"RequiredWagons": 2}));
        let group = OrderGroup::from_order(&order, &options());
        assert_eq!(group.display_id(), "UNKNOWN");
        assert_eq!(group.to_confirmation().order_id, "");
    }

    #[test]
    fn test_confirmation_collects_selection() {
        let mut view = FormView::build(&[sample_order()], &options());
        let group = &mut view.groups_mut()[0];
        assert!(group.reason.select_value("32"));
        assert!(group.departure_time.select_value("06:45"));
        group.comment = "x".repeat(COMMENT_MAX_CHARS + 20);

        let confirmation = group.to_confirmation();
        assert_eq!(confirmation.order_id, "A1");
        assert_eq!(confirmation.reason_underdelivery, "32 Stellwerk nicht besetzt");
        assert_eq!(confirmation.departure_time, "06:45");
        assert_eq!(confirmation.departure_arrival_slot, "00:00 - 02:00");
        assert_eq!(confirmation.comment.chars().count(), COMMENT_MAX_CHARS);
    }

    #[test]
    fn test_apply_edits() {
        let mut view = FormView::build(&[sample_order()], &options());
        let mut edits = BTreeMap::new();
        edits.insert(
            "A1".to_string(),
            OrderEdits {
                wagons: Some(2),
                delivery_date: Some("07.03.2024".to_string()),
                destination_arrival_slot: Some("08:00 - 10:00".to_string()),
                reason: Some("10".to_string()),
                ..Default::default()
            },
        );
        view.apply_edits(&edits).unwrap();
        let confirmation = &view.confirmations()[0];
        assert_eq!(confirmation.wagons, 2);
        assert_eq!(confirmation.delivery_date, "2024-03-07");
        assert_eq!(confirmation.destination_arrival_slot, "08:00 - 10:00");
        assert_eq!(confirmation.reason_underdelivery, "10 zu spät angelieferte Waggons");
    }

    #[test]
    fn test_apply_edits_rejects_unknown_values() {
        let mut view = FormView::build(&[sample_order()], &options());
        let mut edits = BTreeMap::new();
        edits.insert(
            "A1".to_string(),
            OrderEdits {
                departure_time: Some("06:50".to_string()),
                ..Default::default()
            },
        );
        assert!(view.apply_edits(&edits).is_err());

        let mut unknown = BTreeMap::new();
        unknown.insert("ZZ".to_string(), OrderEdits::default());
        assert!(view.apply_edits(&unknown).is_err());
    }

    #[test]
    fn test_edits_file_shape() {
        let edits: OrderEdits =
            serde_json::from_str(r#"{"wagons": 4, "reason": "05", "comment": "Teillieferung"}"#)
                .unwrap();
        assert_eq!(edits.wagons, Some(4));
        assert_eq!(edits.reason.as_deref(), Some("05"));
        assert!(serde_json::from_str::<OrderEdits>(r#"{"wagonz": 4}"#).is_err());
    }
}
