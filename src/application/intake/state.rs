//! Intake flow states, reading plans and choice tokens
//!
//! Every meter variant shares one parameterized reading state; the ordered
//! reading plan per variant decides which question comes next.

/// Sentinel the user types for "no entrance / floor / apartment".
pub const NONE_SENTINEL: &str = "-";

/// Map a free-text answer for an optional address field: the sentinel
/// becomes `None`, anything else is kept trimmed.
pub fn optional_field(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == NONE_SENTINEL {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Current position in the intake flow. One user-supplied value advances
/// the state; there are no backward transitions except an explicit reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeState {
    Idle,
    /// Offering stored addresses for selection
    SelectAddress,
    AwaitCity,
    AwaitStreet,
    AwaitHouse,
    AwaitEntrance,
    AwaitFloor,
    AwaitApartment,
    AwaitServiceChoice,
    /// Electricity meter type selection
    AwaitVariantChoice,
    /// Collecting the reading at `index` of the active variant's plan
    AwaitReading { index: usize },
    AwaitUnloads,
    AwaitBins,
    /// Offering bill history rows for detail view
    SelectBill,
}

/// Metered service variant; drives the reading plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeterVariant {
    SingleZone,
    TwoZone,
    ThreeZone,
    Gas,
}

/// Metering zone a reading belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Single,
    Day,
    Night,
    Peak,
    Gas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingKind {
    Current,
    Previous,
}

/// One question in a reading plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingSlot {
    pub zone: Zone,
    pub kind: ReadingKind,
}

const fn slot(zone: Zone, kind: ReadingKind) -> ReadingSlot {
    ReadingSlot { zone, kind }
}

impl MeterVariant {
    /// Ordered questions for this variant: all current readings first,
    /// then the previous ones.
    pub fn plan(&self) -> &'static [ReadingSlot] {
        use ReadingKind::{Current, Previous};
        const SINGLE: &[ReadingSlot] = &[
            slot(Zone::Single, Current),
            slot(Zone::Single, Previous),
        ];
        const TWO: &[ReadingSlot] = &[
            slot(Zone::Day, Current),
            slot(Zone::Night, Current),
            slot(Zone::Day, Previous),
            slot(Zone::Night, Previous),
        ];
        const THREE: &[ReadingSlot] = &[
            slot(Zone::Peak, Current),
            slot(Zone::Day, Current),
            slot(Zone::Night, Current),
            slot(Zone::Peak, Previous),
            slot(Zone::Day, Previous),
            slot(Zone::Night, Previous),
        ];
        const GAS: &[ReadingSlot] = &[slot(Zone::Gas, Current), slot(Zone::Gas, Previous)];
        match self {
            Self::SingleZone => SINGLE,
            Self::TwoZone => TWO,
            Self::ThreeZone => THREE,
            Self::Gas => GAS,
        }
    }

    /// Index of the `Current` reading that pairs with the `Previous` slot
    /// at `index`, if that slot is a previous reading.
    pub fn paired_current(&self, index: usize) -> Option<usize> {
        let plan = self.plan();
        let here = plan.get(index)?;
        if here.kind != ReadingKind::Previous {
            return None;
        }
        plan.iter()
            .position(|s| s.zone == here.zone && s.kind == ReadingKind::Current)
    }
}

impl ReadingSlot {
    pub fn prompt(&self) -> String {
        let kind = match self.kind {
            ReadingKind::Current => "current",
            ReadingKind::Previous => "previous",
        };
        match self.zone {
            Zone::Single => format!("Enter the {} meter reading:", kind),
            Zone::Gas => format!("Enter the {} gas meter reading:", kind),
            Zone::Day => format!("Enter the {} meter reading for the 'Day' zone:", kind),
            Zone::Night => format!("Enter the {} meter reading for the 'Night' zone:", kind),
            Zone::Peak => format!("Enter the {} meter reading for the 'Peak' zone:", kind),
        }
    }
}

/// Service picked from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceChoice {
    Electricity,
    Gas,
    Trash,
    Bills,
}

/// Parsed choice token as delivered by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceToken {
    SelectAddress(i32),
    AddNewAddress,
    Service(ServiceChoice),
    Meter(MeterVariant),
    BillDetail(i32),
}

impl ChoiceToken {
    pub fn parse(token: &str) -> Option<Self> {
        if let Some(id) = token.strip_prefix("select_address_") {
            return id.parse().ok().map(Self::SelectAddress);
        }
        if let Some(id) = token.strip_prefix("bill_detail_") {
            return id.parse().ok().map(Self::BillDetail);
        }
        match token {
            "add_new_address" => Some(Self::AddNewAddress),
            "service_electricity" => Some(Self::Service(ServiceChoice::Electricity)),
            "service_gas" => Some(Self::Service(ServiceChoice::Gas)),
            "service_trash" => Some(Self::Service(ServiceChoice::Trash)),
            "service_bills" => Some(Self::Service(ServiceChoice::Bills)),
            "meter_single_zone" => Some(Self::Meter(MeterVariant::SingleZone)),
            "meter_two_zone" => Some(Self::Meter(MeterVariant::TwoZone)),
            "meter_three_zone" => Some(Self::Meter(MeterVariant::ThreeZone)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plans_ask_currents_before_previouses() {
        for variant in [
            MeterVariant::SingleZone,
            MeterVariant::TwoZone,
            MeterVariant::ThreeZone,
            MeterVariant::Gas,
        ] {
            let plan = variant.plan();
            let first_previous = plan
                .iter()
                .position(|s| s.kind == ReadingKind::Previous)
                .unwrap();
            assert!(plan[..first_previous]
                .iter()
                .all(|s| s.kind == ReadingKind::Current));
            assert!(plan[first_previous..]
                .iter()
                .all(|s| s.kind == ReadingKind::Previous));
        }
    }

    #[test]
    fn paired_current_matches_zone() {
        let v = MeterVariant::ThreeZone;
        // previous 'Day' is at index 4, current 'Day' at index 1
        assert_eq!(v.paired_current(4), Some(1));
        // current slots have no pair
        assert_eq!(v.paired_current(0), None);
    }

    #[test]
    fn choice_tokens_round_trip() {
        assert_eq!(
            ChoiceToken::parse("select_address_17"),
            Some(ChoiceToken::SelectAddress(17))
        );
        assert_eq!(
            ChoiceToken::parse("bill_detail_3"),
            Some(ChoiceToken::BillDetail(3))
        );
        assert_eq!(
            ChoiceToken::parse("meter_two_zone"),
            Some(ChoiceToken::Meter(MeterVariant::TwoZone))
        );
        assert_eq!(ChoiceToken::parse("select_address_x"), None);
        assert_eq!(ChoiceToken::parse("bogus"), None);
    }

    #[test]
    fn sentinel_maps_to_none() {
        assert_eq!(optional_field("-"), None);
        assert_eq!(optional_field("  - "), None);
        assert_eq!(optional_field(""), None);
        assert_eq!(optional_field(" 4 "), Some("4".to_string()));
    }
}
