//! Service configuration
//!
//! Read from `<config dir>/server.yml`, where the directory comes from the
//! command line or the `CONFIG_PATH` environment variable.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use overlap_infra::{string_from_scalar, ConfigLoader, EnvBindings, LoggerConfig};
use overlap_types::Result;

pub const SERVER_CONFIG_FILE: &str = "server.yml";
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(
        default,
        rename = "environmentname",
        alias = "environment_name",
        deserialize_with = "string_from_scalar"
    )]
    pub environment_name: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logger: LoggerConfig,
}

/// HTTP listener settings; timeouts are in seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host", deserialize_with = "string_from_scalar")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_timeout", rename = "readtimeout", alias = "read_timeout")]
    pub read_timeout: u64,

    #[serde(default = "default_timeout", rename = "writetimeout", alias = "write_timeout")]
    pub write_timeout: u64,

    #[serde(default = "default_idle_timeout", rename = "idletimeout", alias = "idle_timeout")]
    pub idle_timeout: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    60
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            read_timeout: default_timeout(),
            write_timeout: default_timeout(),
            idle_timeout: default_idle_timeout(),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Upper bound for handling one request; `None` when both timeouts are 0
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.read_timeout.max(self.write_timeout) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// How long in-flight connections may drain after a shutdown signal
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.idle_timeout)
    }
}

impl Configuration {
    /// Resolve `server.yml`, falling back to `CONFIG_PATH` when no directory is given
    pub fn config_file(config_dir: Option<&Path>) -> PathBuf {
        let dir = match config_dir {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => std::env::var_os(CONFIG_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_default(),
        };
        dir.join(SERVER_CONFIG_FILE)
    }

    /// Environment variables honoured by the service binary.
    ///
    /// Values are typed as YAML scalars, so `OVERLAP_ENVIRONMENT=2024`
    /// arrives as a number; string fields accept that through
    /// [`string_from_scalar`].
    pub fn default_env_bindings() -> EnvBindings {
        [
            ("environmentname", "OVERLAP_ENVIRONMENT"),
            ("server.host", "OVERLAP_SERVER_HOST"),
            ("server.port", "OVERLAP_SERVER_PORT"),
            ("logger.level", "OVERLAP_LOG_LEVEL"),
            ("logger.logdir", "OVERLAP_LOG_DIR"),
        ]
        .into_iter()
        .map(|(key, env)| (key.to_string(), env.to_string()))
        .collect()
    }

    /// Load `path`, merge `override_path` over it, then apply `env_bindings`
    pub fn load(path: &Path, override_path: Option<&Path>, env_bindings: EnvBindings) -> Result<Self> {
        let mut loader = ConfigLoader::new(path).with_env_bindings(env_bindings);
        if let Some(override_path) = override_path {
            loader = loader.with_override(override_path);
        }
        Ok(loader.load()?)
    }
}
