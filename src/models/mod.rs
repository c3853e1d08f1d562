pub mod product;
pub mod history;

pub use product::{CurrentPricesDocument, Product};
pub use history::{HistoryDocument, HistoryEntry, ProductHistory};
