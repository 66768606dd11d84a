//! Output formatting module

use std::io;

use rts_app::export::{write_confirmations_csv, write_orders_csv, write_slots_csv};
use rts_domain::model::{Order, OrderConfirmation, TimeSlot};
use rts_types::{OutputFormat, Result};

pub fn output_orders(output_format: OutputFormat, orders: &[Order]) -> Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(orders)?);
        }
        OutputFormat::Csv => write_orders_csv(io::stdout().lock(), orders)?,
        OutputFormat::Table => {
            if orders.is_empty() {
                println!("No orders found in link");
                return Ok(());
            }
            println!(
                "{:<12} {:<20} {:>4} {:>6}  {:<10}  {:<10}  {:<3} {:<20} Route",
                "Order ID", "Supplier", "CW", "Wagons", "Transport", "Delivery", "Prf", "Type"
            );
            println!("{}", "-".repeat(110));
            for order in orders {
                println!(
                    "{:<12} {:<20} {:>4} {:>6}  {:<10}  {:<10}  {:<3} {:<20} {}",
                    truncate(&order.order_id, 12),
                    truncate(&order.supplier, 20),
                    truncate(&order.cw, 4),
                    order.wagons,
                    order.transport_date,
                    order.delivery_date,
                    order.wagon_profile,
                    truncate(&order.wagon_type, 20),
                    order.route
                );
            }
            println!("\nTotal: {} orders", orders.len());
        }
    }
    Ok(())
}

pub fn output_slots(output_format: OutputFormat, slots: &[TimeSlot]) -> Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(slots)?);
        }
        OutputFormat::Csv => write_slots_csv(io::stdout().lock(), slots)?,
        OutputFormat::Table => {
            for slot in slots {
                println!("{}", slot.text);
            }
        }
    }
    Ok(())
}

/// Print a success/message pair
pub fn output_outcome(output_format: OutputFormat, success: bool, message: &str) -> Result<()> {
    match output_format {
        OutputFormat::Json => {
            let value = serde_json::json!({ "success": success, "message": message });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Csv | OutputFormat::Table => println!("{}", message),
    }
    Ok(())
}

/// Print a submission outcome; json and csv include the sent confirmations
pub fn output_submission(
    output_format: OutputFormat,
    success: bool,
    message: &str,
    confirmations: &[OrderConfirmation],
) -> Result<()> {
    match output_format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "success": success,
                "message": message,
                "orders": confirmations,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Csv => {
            eprintln!("{}", message);
            write_confirmations_csv(io::stdout().lock(), confirmations)?;
        }
        OutputFormat::Table => println!("{}", message),
    }
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Holz", 12), "Holz");
        assert_eq!(truncate("Holzindustrie Süd", 6), "Holzi…");
    }
}
