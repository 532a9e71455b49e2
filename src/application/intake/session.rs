//! Ephemeral per-conversation intake session

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use super::state::{IntakeState, MeterVariant};

/// Accumulated address answers. All fields start empty and fill in the
/// strict question order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressForm {
    pub city: Option<String>,
    pub street: Option<String>,
    pub house: Option<String>,
    pub entrance: Option<String>,
    pub floor: Option<String>,
    pub apartment: Option<String>,
}

/// Per-conversation state: current position in the flow plus everything
/// collected so far. Created when a flow starts, discarded on completion
/// or reset; stale sessions are evicted by the registry TTL sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeSession {
    pub state: IntakeState,
    pub user_id: i32,
    pub address_id: Option<i32>,
    pub form: AddressForm,
    pub variant: Option<MeterVariant>,
    /// Readings collected so far, aligned with the variant's plan
    pub readings: Vec<Decimal>,
    pub unloads: Option<u32>,
    pub last_activity: DateTime<Utc>,
}

impl IntakeSession {
    pub fn new(user_id: i32) -> Self {
        Self {
            state: IntakeState::Idle,
            user_id,
            address_id: None,
            form: AddressForm::default(),
            variant: None,
            readings: Vec::new(),
            unloads: None,
            last_activity: Utc::now(),
        }
    }

    /// Update the activity timestamp.
    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    /// Whether the session has been idle longer than `ttl`.
    pub fn is_stale(&self, ttl: Duration) -> bool {
        Utc::now().signed_duration_since(self.last_activity) > ttl
    }

    /// Clear everything collected for the current flow and return to idle.
    /// The user identity survives; the next flow starts from the entry point.
    pub fn reset_flow(&mut self) {
        self.state = IntakeState::Idle;
        self.address_id = None;
        self.form = AddressForm::default();
        self.variant = None;
        self.readings.clear();
        self.unloads = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_clears_flow_but_keeps_user() {
        let mut s = IntakeSession::new(7);
        s.state = IntakeState::AwaitBins;
        s.address_id = Some(3);
        s.unloads = Some(4);
        s.readings.push(Decimal::new(100, 0));
        s.reset_flow();
        assert_eq!(s.state, IntakeState::Idle);
        assert_eq!(s.user_id, 7);
        assert_eq!(s.address_id, None);
        assert!(s.readings.is_empty());
        assert_eq!(s.unloads, None);
    }

    #[test]
    fn staleness_respects_ttl() {
        let mut s = IntakeSession::new(1);
        assert!(!s.is_stale(Duration::minutes(60)));
        s.last_activity = Utc::now() - Duration::minutes(61);
        assert!(s.is_stale(Duration::minutes(60)));
    }
}
