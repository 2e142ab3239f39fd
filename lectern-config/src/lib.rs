//! Configuration library for Lectern.
//!
//! Values are layered from built-in defaults, an optional TOML file, and the
//! process environment (after `.env` is applied), then checked by a small set
//! of guard rails before the server starts.

#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::{
    Config, ConfigMetadata, ContentConfig, CorsConfig, DatabaseConfig,
    ServerConfig,
};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
