pub mod model;
pub mod repository;

pub use model::{Address, NewAddress};
pub use repository::AddressRepository;
