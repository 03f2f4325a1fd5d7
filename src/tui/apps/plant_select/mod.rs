//! Plant selection screen: environment chips over an infinite two-column grid

pub mod app;
pub mod state;
mod view;

pub use app::{Msg, PlantSelectApp};
pub use state::State;
