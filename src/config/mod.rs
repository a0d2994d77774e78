//! Twin Configuration Module
//!
//! Per-deployment configuration loaded from TOML files.
//!
//! ## Loading Order
//!
//! 1. `TWIN_CONFIG` environment variable (path to TOML file)
//! 2. `twin_config.toml` in the current working directory
//! 3. Built-in defaults
//!
//! The loaded `TwinConfig` is handed to the API state explicitly; there is
//! no global.

pub mod defaults;
mod twin_config;
pub mod validation;

pub use twin_config::*;
