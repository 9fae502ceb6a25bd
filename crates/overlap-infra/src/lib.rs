//! Infrastructure layer - layered config loading, logging

pub mod config_loader;
pub mod logger;

pub use config_loader::{string_from_scalar, ConfigLoader, EnvBindings};
pub use logger::{Logger, LoggerConfig, TracingLogger};
