//! Underdelivery reason codes (Unterlieferungsgründe)

/// One selectable reason
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReasonOption {
    pub value: &'static str,
    pub text: &'static str,
}

/// Value of the default "no underdelivery" entry
pub const NO_REASON: &str = "None";

pub const REASONS: &[ReasonOption] = &[
    ReasonOption { value: NO_REASON, text: "— Keine Unterlieferung —" },
    ReasonOption { value: "05", text: "05 Falsche Waggongattung angeliefert" },
    ReasonOption { value: "06", text: "06 Fehlende Waggons - Schadwaggon" },
    ReasonOption { value: "07", text: "07 Ausrangierung Schadwaggons" },
    ReasonOption { value: "08", text: "08 fehlende Lokführerverfügbarkeit" },
    ReasonOption { value: "09", text: "09 zu wenige Waggons - falsche Planung Bahn-DL" },
    ReasonOption { value: "10", text: "10 zu spät angelieferte Waggons" },
    ReasonOption { value: "11", text: "11 Fehlende Lokführerverfügbarkeit" },
    ReasonOption { value: "12", text: "12 Zugverspätung - Arbeitszeit Ende" },
    ReasonOption { value: "13", text: "13 Zugverspätung - Sonstiges Bahn DL" },
    ReasonOption { value: "14", text: "14 Zugverspätung - Sonstiges" },
    ReasonOption { value: "15", text: "15 Streik - Bahn Infrastruktur" },
    ReasonOption { value: "25", text: "25 technische Störungen Bahnhof bzw. Rangierer" },
    ReasonOption {
        value: "26",
        text: "26 technische Störungen auf der Strecke (z.B. Bahnübergang, Stellwerkstörung)",
    },
    ReasonOption {
        value: "27",
        text: "27 Rangierleistung nicht ausreichend - Rangierdienst unterbesetzt",
    },
    ReasonOption {
        value: "28",
        text: "28 Rangierleistung nicht ausreichend - Rangierdienst in Pause",
    },
    ReasonOption {
        value: "29",
        text: "29 Rangierleistung nicht ausreichend - Lokschaden/ Lokstörung",
    },
    ReasonOption { value: "30", text: "30 Zeitplanung Rangierverkehr" },
    ReasonOption {
        value: "31",
        text: "31 Rangierleistung nicht ausreichend (z.B. bei zu viel Rangierung Schadwaggons/Züge gleichzeitig/Lokverfügbarkeit/Lokführer krank, Lokstörrung…)",
    },
    ReasonOption { value: "32", text: "32 Stellwerk nicht besetzt" },
    ReasonOption { value: "33", text: "33 Lokzuführung verspätet" },
    ReasonOption {
        value: "34",
        text: "34 Warten aus Lok - Störung auf der Strecke; Fahren auf Sicht",
    },
    ReasonOption { value: "35", text: "35 Warten auf Lok - Infrastruktur überlastet" },
    ReasonOption { value: "36", text: "36 Warten aus Lok - Sonstiges" },
    ReasonOption { value: "37", text: "37 Streckensperrung --> keine Umleitung möglich" },
    ReasonOption { value: "38", text: "38 Baustelle/ Infrastruktur" },
    ReasonOption {
        value: "39",
        text: "39 Blockierung Transportwege (Abgrenzung zur technischen Störrung, z.B. liegengebliebener Zug auf der Strecke)",
    },
    ReasonOption { value: "40", text: "40 Umleitung netzbedingt; Personen im Gleis" },
    ReasonOption {
        value: "41",
        text: "41 Infrastruktur (Baustellen, Oberleitungsstörung, Rückstau wg. Überfüllung der Umleitungen)",
    },
    ReasonOption { value: "42", text: "42 fehlende Trassenverfügbarkeit" },
    ReasonOption { value: "43", text: "43 Dispositive Zulaufsteuerung" },
    ReasonOption { value: "53", text: "53 Fehlende Waggons - falsche Planung Bahn-DL" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reason_first() {
        assert_eq!(REASONS[0].value, NO_REASON);
    }

    #[test]
    fn test_codes_are_unique() {
        let mut values: Vec<_> = REASONS.iter().map(|r| r.value).collect();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values.len(), REASONS.len());
    }

    #[test]
    fn test_text_starts_with_code() {
        for reason in REASONS.iter().skip(1) {
            assert!(reason.text.starts_with(reason.value), "{}", reason.text);
        }
    }
}
