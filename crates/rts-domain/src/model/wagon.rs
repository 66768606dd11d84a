//! Wagon fleet categories

use serde::{Deserialize, Serialize};

/// Wagon loading profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WagonProfile {
    G1,
    G2,
}

impl WagonProfile {
    pub const ALL: [WagonProfile; 2] = [WagonProfile::G1, WagonProfile::G2];

    pub fn label(&self) -> &'static str {
        match self {
            WagonProfile::G1 => "G1",
            WagonProfile::G2 => "G2",
        }
    }

    /// Parse a profile label, ignoring surrounding whitespace and case
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(value))
    }
}

/// Wagon body type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WagonType {
    /// Offen
    Open,
    /// Geschlossen
    Closed,
    /// Offen + Geschlossen
    Mixed,
}

impl WagonType {
    pub const ALL: [WagonType; 3] = [WagonType::Open, WagonType::Closed, WagonType::Mixed];

    pub fn label(&self) -> &'static str {
        match self {
            WagonType::Open => "Offen",
            WagonType::Closed => "Geschlossen",
            WagonType::Mixed => "Offen + Geschlossen",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(value))
    }
}

impl std::fmt::Display for WagonProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::fmt::Display for WagonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
