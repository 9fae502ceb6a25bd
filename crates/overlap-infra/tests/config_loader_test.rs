//! Layered config loading against real files

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tempfile::tempdir;

use overlap_infra::{ConfigLoader, EnvBindings};
use overlap_types::ConfigError;

#[derive(Debug, Deserialize)]
struct TestConfig {
    server: ServerSection,
    #[serde(default)]
    database: DatabaseSection,
    debug: bool,
}

#[derive(Debug, Deserialize)]
struct ServerSection {
    port: u16,
    host: String,
}

#[derive(Debug, Default, Deserialize)]
struct DatabaseSection {
    url: String,
    username: String,
    password: String,
}

const BASE_YAML: &str = r#"
server:
  port: 8080
  host: localhost
database:
  url: postgresql://localhost:5432/testdb
  username: testuser
  password: testpass
debug: true
"#;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write config fixture");
    path
}

fn bindings(pairs: &[(&str, &str)]) -> EnvBindings {
    pairs
        .iter()
        .map(|(key, env)| (key.to_string(), env.to_string()))
        .collect()
}

#[test]
fn test_basic_yaml() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "config.yaml", BASE_YAML);

    let config: TestConfig = ConfigLoader::new(path).load().unwrap();

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.host, "localhost");
    assert_eq!(config.database.url, "postgresql://localhost:5432/testdb");
    assert_eq!(config.database.username, "testuser");
    assert_eq!(config.database.password, "testpass");
    assert!(config.debug);
}

#[test]
fn test_basic_json() {
    let dir = tempdir().unwrap();
    let path = write(
        dir.path(),
        "config.json",
        r#"{
  "server": {"port": 9090, "host": "0.0.0.0"},
  "database": {"url": "mysql://localhost:3306/testdb", "username": "jsonuser", "password": "jsonpass"},
  "debug": false
}"#,
    );

    let config: TestConfig = ConfigLoader::new(path).load().unwrap();

    assert_eq!(config.server.port, 9090);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.database.username, "jsonuser");
    assert!(!config.debug);
}

#[test]
fn test_basic_toml() {
    let dir = tempdir().unwrap();
    let path = write(
        dir.path(),
        "config.toml",
        r#"
debug = true

[server]
port = 7070
host = "toml.host"

[database]
url = "postgresql://toml:5432/db"
username = "tomluser"
password = "tomlpass"
"#,
    );

    let config: TestConfig = ConfigLoader::new(path).load().unwrap();

    assert_eq!(config.server.port, 7070);
    assert_eq!(config.server.host, "toml.host");
    assert_eq!(config.database.password, "tomlpass");
    assert!(config.debug);
}

#[test]
fn test_mixed_case_keys() {
    let dir = tempdir().unwrap();
    let path = write(
        dir.path(),
        "config.yml",
        "Server:\n  Port: 8181\n  HOST: upper\nDebug: false\n",
    );

    let config: TestConfig = ConfigLoader::new(path).load().unwrap();

    assert_eq!(config.server.port, 8181);
    assert_eq!(config.server.host, "upper");
}

#[test]
fn test_override_file_merges() {
    let dir = tempdir().unwrap();
    let base = write(dir.path(), "config.yaml", BASE_YAML);
    let overrides = write(
        dir.path(),
        "override.yaml",
        "server:\n  port: 9090\ndatabase:\n  password: overridepass\ndebug: false\n",
    );

    let config: TestConfig = ConfigLoader::new(base).with_override(overrides).load().unwrap();

    assert_eq!(config.server.port, 9090);
    assert_eq!(config.server.host, "localhost");
    assert_eq!(config.database.url, "postgresql://localhost:5432/testdb");
    assert_eq!(config.database.username, "testuser");
    assert_eq!(config.database.password, "overridepass");
    assert!(!config.debug);
}

#[test]
fn test_override_in_other_format() {
    let dir = tempdir().unwrap();
    let base = write(dir.path(), "config.yaml", BASE_YAML);
    let overrides = write(dir.path(), "override.json", r#"{"server": {"host": "json.host"}}"#);

    let config: TestConfig = ConfigLoader::new(base).with_override(overrides).load().unwrap();

    assert_eq!(config.server.host, "json.host");
    assert_eq!(config.server.port, 8080);
}

#[test]
fn test_empty_override_path_is_ignored() {
    let dir = tempdir().unwrap();
    let base = write(dir.path(), "config.yaml", BASE_YAML);

    let config: TestConfig = ConfigLoader::new(base).with_override("").load().unwrap();

    assert_eq!(config.server.port, 8080);
    assert!(config.debug);
}

#[test]
fn test_missing_override_is_an_error() {
    let dir = tempdir().unwrap();
    let base = write(dir.path(), "config.yaml", BASE_YAML);

    let result: Result<TestConfig, _> = ConfigLoader::new(base)
        .with_override("/nonexistent/override.yaml")
        .load();

    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

#[test]
fn test_env_bindings_override_values() {
    std::env::set_var("OVERLAP_TEST_PORT", "9000");
    std::env::set_var("OVERLAP_TEST_HOST", "production.com");
    std::env::set_var("OVERLAP_TEST_DEBUG", "false");

    let dir = tempdir().unwrap();
    let path = write(dir.path(), "config.yaml", BASE_YAML);

    let config: TestConfig = ConfigLoader::new(path)
        .with_env_bindings(bindings(&[
            ("server.port", "OVERLAP_TEST_PORT"),
            ("server.host", "OVERLAP_TEST_HOST"),
            ("debug", "OVERLAP_TEST_DEBUG"),
        ]))
        .load()
        .unwrap();

    std::env::remove_var("OVERLAP_TEST_PORT");
    std::env::remove_var("OVERLAP_TEST_HOST");
    std::env::remove_var("OVERLAP_TEST_DEBUG");

    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.host, "production.com");
    assert!(!config.debug);
    assert_eq!(config.database.url, "postgresql://localhost:5432/testdb");
}

#[test]
fn test_multiple_binding_sets() {
    std::env::set_var("OVERLAP_MULTI_PORT", "3000");
    std::env::set_var("OVERLAP_MULTI_DEBUG", "false");

    let dir = tempdir().unwrap();
    let path = write(dir.path(), "config.yaml", "server:\n  port: 8080\n  host: localhost\ndebug: true\n");

    let config: TestConfig = ConfigLoader::new(path)
        .with_env_bindings(bindings(&[("server.port", "OVERLAP_MULTI_PORT")]))
        .with_env_bindings(bindings(&[("debug", "OVERLAP_MULTI_DEBUG")]))
        .load()
        .unwrap();

    std::env::remove_var("OVERLAP_MULTI_PORT");
    std::env::remove_var("OVERLAP_MULTI_DEBUG");

    assert_eq!(config.server.port, 3000);
    assert!(!config.debug);
}

#[test]
fn test_binding_with_empty_env_name_is_skipped() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "config.yaml", "server:\n  port: 8080\n  host: localhost\ndebug: true\n");

    let config: TestConfig = ConfigLoader::new(path)
        .with_env_bindings(bindings(&[("server.port", "")]))
        .load()
        .unwrap();

    assert_eq!(config.server.port, 8080);
}

#[test]
fn test_file_not_found() {
    let result: Result<TestConfig, _> = ConfigLoader::new("/nonexistent/config.yaml").load();

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Config File"));
    assert!(err.to_string().contains("Not Found"));
}

#[test]
fn test_invalid_yaml() {
    let dir = tempdir().unwrap();
    let path = write(
        dir.path(),
        "invalid.yaml",
        "server:\n  port: 8080\n  host: localhost\ndatabase:\n  username: testuser\n    password: testpass\n",
    );

    let result: Result<TestConfig, _> = ConfigLoader::new(path).load();
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_invalid_json() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "invalid.json", r#"{"server": {"port": 9090,}, "debug": false,}"#);

    let result: Result<TestConfig, _> = ConfigLoader::new(path).load();
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_type_mismatch() {
    let dir = tempdir().unwrap();
    let path = write(
        dir.path(),
        "config.yaml",
        "server:\n  port: \"not_a_number\"\n  host: localhost\ndebug: true\n",
    );

    let result: Result<TestConfig, _> = ConfigLoader::new(path).load();
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_unsupported_extension() {
    let dir = tempdir().unwrap();
    let path = write(dir.path(), "config.ini", "[server]\nport=1\n");

    let result: Result<TestConfig, _> = ConfigLoader::new(path).load();
    assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
}
