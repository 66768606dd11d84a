//! Time slot tables for the scheduling selects

use crate::model::TimeSlot;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Generate the slots of one day at `interval_minutes`
///
/// Intervals under an hour give point labels (`"HH:MM"`); hourly and
/// coarser intervals give range labels (`"HH:MM - HH:MM"`) whose end wraps
/// past midnight. An interval of 0 or longer than a day yields no slots.
pub fn generate_time_slots(interval_minutes: u32) -> Vec<TimeSlot> {
    if interval_minutes == 0 || interval_minutes > MINUTES_PER_DAY {
        return Vec::new();
    }

    (0..MINUTES_PER_DAY)
        .step_by(interval_minutes as usize)
        .map(|start| {
            let label = if interval_minutes < 60 {
                clock_label(start)
            } else {
                let end = (start + interval_minutes) % MINUTES_PER_DAY;
                format!("{} - {}", clock_label(start), clock_label(end))
            };
            TimeSlot::new(label)
        })
        .collect()
}

fn clock_label(minute_of_day: u32) -> String {
    format!("{:02}:{:02}", minute_of_day / 60, minute_of_day % 60)
}
