//! Application layer: use cases orchestrating domain logic over the
//! repository and transport ports.

pub mod intake;
pub mod ports;
pub mod receipt;
pub mod services;
pub mod session;

pub use intake::IntakeEngine;
pub use ports::{ConversationDriver, PromptChoice};
pub use services::{BillingService, RetentionSweeper};
pub use session::{SessionRegistry, SharedSessionRegistry};
