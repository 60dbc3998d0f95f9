/// Database configuration, connection management and the schema registry
pub mod database;

/// Reference data descriptions loaded from config.toml
pub mod reference;
