/// Database configuration and connection management
pub mod database;

/// Building and floor seed configuration from config.toml
pub mod properties;
