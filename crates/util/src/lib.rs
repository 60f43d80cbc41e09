//! Configuration and translation helpers shared by the panel engine and CLI.

pub mod config;
pub mod translate;

pub use config::{CONFIG_PATH_ENV, ConfigError, PanelConfig, default_config_path};
pub use translate::Translator;
