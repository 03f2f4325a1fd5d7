pub mod browse;
pub mod config;
pub mod environments;
pub mod plants;

pub use browse::browse_command;
pub use config::{ConfigCommands, config_command};
pub use environments::environments_command;
pub use plants::{PlantsCommands, plants_command};
