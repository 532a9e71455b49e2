pub mod billing;
pub mod retention;

pub use billing::BillingService;
pub use retention::RetentionSweeper;
