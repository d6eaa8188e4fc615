//! Process configuration for vaultsecrets
//!
//! This crate resolves the handful of settings the secrets core consumes
//! (whether to read the injected file, where it lives, and whether usage
//! telemetry is reported) from environment variables with documented
//! fallbacks.

pub mod config;
pub mod loader;


pub use config::{Configuration, ConfigurationBuilder};
pub use loader::parse_env_bool;
