//! Intake state machine: the conversational form-filling flow.

pub mod machine;
pub mod session;
pub mod state;

pub use machine::IntakeEngine;
pub use session::{AddressForm, IntakeSession};
pub use state::{
    optional_field, ChoiceToken, IntakeState, MeterVariant, ReadingKind, ReadingSlot,
    ServiceChoice, Zone, NONE_SENTINEL,
};
