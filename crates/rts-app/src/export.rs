//! CSV export of orders, confirmations and slot tables
//!
//! Column names follow the camelCase JSON field names so the CSV output
//! lines up with the JSON output of the same command.

use std::io::Write;

use serde::Serialize;

use rts_domain::model::{Order, OrderConfirmation, TimeSlot};
use rts_types::Result;

fn write_records<W: Write, T: Serialize>(writer: W, records: &[T]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write normalized orders, one row per order
pub fn write_orders_csv<W: Write>(writer: W, orders: &[Order]) -> Result<()> {
    write_records(writer, orders)
}

/// Write collected confirmations, one row per order
pub fn write_confirmations_csv<W: Write>(
    writer: W,
    confirmations: &[OrderConfirmation],
) -> Result<()> {
    write_records(writer, confirmations)
}

/// Write a slot table as `value,text`
pub fn write_slots_csv<W: Write>(writer: W, slots: &[TimeSlot]) -> Result<()> {
    write_records(writer, slots)
}
