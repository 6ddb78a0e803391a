pub mod answers;
pub mod commands;
pub mod config;
pub mod logging;
