//! Data module - CSV loading, merging and filtering

mod filter;
mod loader;
mod processor;

pub use filter::{FilterCriteria, FilterError, RatingRange};
pub use loader::{DataLoader, Dataset};
pub use processor::TableView;
