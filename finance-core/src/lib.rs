pub mod calculations;
pub mod carousel;
pub mod config;
pub mod format;
pub mod models;
pub mod validation;
pub mod wizard;

pub use models::*;
