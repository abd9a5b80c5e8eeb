//! Application configuration module.
//!
//! Manages the TOML config file holding TMDB credentials and client
//! defaults.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, ENV_API_KEY, ENV_BEARER_TOKEN, TmdbConfig, redact};
pub use paths::resolve_config_path;
