//! Pre-submission validation of confirmed orders

use serde::Serialize;

use crate::model::OrderConfirmation;

/// Outcome of validating a batch of confirmations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// All errors as one message
    pub fn summary(&self) -> String {
        self.errors.join(", ")
    }
}

/// Check every order for an id, a positive wagon count and both dates
pub fn validate_orders(orders: &[OrderConfirmation]) -> ValidationReport {
    let mut errors = Vec::new();

    if orders.is_empty() {
        errors.push("Keine Bestellungen zum Absenden vorhanden.".to_string());
        return ValidationReport {
            valid: false,
            errors,
        };
    }

    for (index, order) in orders.iter().enumerate() {
        if order.order_id.trim().is_empty() {
            errors.push(format!("Bestellung {}: Bestell-ID fehlt.", index + 1));
        }
        if order.wagons < 1 {
            errors.push(format!("Bestellung {}: Ungültige Wagenanzahl.", order.order_id));
        }
        if order.transport_date.trim().is_empty() {
            errors.push(format!("Bestellung {}: Transportdatum fehlt.", order.order_id));
        }
        if order.delivery_date.trim().is_empty() {
            errors.push(format!("Bestellung {}: Lieferdatum fehlt.", order.order_id));
        }
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(id: &str) -> OrderConfirmation {
        OrderConfirmation {
            order_id: id.to_string(),
            wagons: 2,
            transport_date: "2024-03-05".to_string(),
            delivery_date: "2024-03-06".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_batch_is_invalid() {
        let report = validate_orders(&[]);
        assert!(!report.valid);
        assert_eq!(report.errors, vec!["Keine Bestellungen zum Absenden vorhanden."]);
    }

    #[test]
    fn test_complete_batch_is_valid() {
        let report = validate_orders(&[complete("A1"), complete("A2")]);
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_missing_transport_date_names_order() {
        let mut broken = complete("A2");
        broken.transport_date.clear();
        let report = validate_orders(&[complete("A1"), broken]);
        assert!(!report.valid);
        assert_eq!(report.errors, vec!["Bestellung A2: Transportdatum fehlt."]);
    }

    #[test]
    fn test_errors_are_aggregated() {
        let broken = OrderConfirmation::default();
        let report = validate_orders(&[broken]);
        assert_eq!(report.errors.len(), 4);
        assert_eq!(report.errors[0], "Bestellung 1: Bestell-ID fehlt.");
        assert!(report.summary().contains("Ungültige Wagenanzahl"));
        assert!(report.summary().contains(", "));
    }
}
