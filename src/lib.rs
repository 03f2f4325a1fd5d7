pub mod api;
pub mod cli;
pub mod config;
pub mod plants;
pub mod tui;
