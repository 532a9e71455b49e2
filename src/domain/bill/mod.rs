pub mod model;
pub mod repository;

pub use model::{Bill, BillSummary, NewBill};
pub use repository::BillRepository;
