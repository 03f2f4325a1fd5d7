//! Selection logic shared by the TUI screen and the CLI listing commands

pub mod catalog;
pub mod pagination;

pub use catalog::{ALL_ENVIRONMENTS, ALL_ENVIRONMENTS_TITLE, PlantCatalog, with_all_sentinel};
pub use pagination::{END_REACHED_MIN_DISTANCE, Pagination};
