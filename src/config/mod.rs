/// Database connection and table creation
pub mod database;

/// Service catalog loading from catalog.toml
pub mod catalog;

/// Runtime settings from environment variables
pub mod settings;

pub use settings::Settings;
