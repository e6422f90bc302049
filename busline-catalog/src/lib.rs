pub mod catalog;
pub mod inventory;

pub use catalog::Catalog;
