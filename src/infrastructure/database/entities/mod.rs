//! Database entities module

pub mod address;
pub mod bill;
pub mod user;

pub use address::Entity as Address;
pub use bill::Entity as Bill;
pub use user::Entity as User;
