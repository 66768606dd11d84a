use serde::{Deserialize, Serialize};

/// Selectable time slot option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub value: String,
    pub text: String,
}

impl TimeSlot {
    pub fn new(label: String) -> Self {
        Self {
            value: label.clone(),
            text: label,
        }
    }
}
