//! Configuration management

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::client_config::ClientConfig;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "EDU_ADMIN_CONFIG";

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the compiled web bundle
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Served verbatim as `/client-config.json`
    #[serde(default)]
    pub client: ClientConfig,
}

fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("dist")
}

pub fn load_config() -> Result<Config> {
    let explicit = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
    load_config_from(explicit.as_deref())
}

/// Defaults, then the config file (`path`, or `config.*` in the platform
/// config dir), then `EDU_ADMIN_*` environment variables.
pub fn load_config_from(path: Option<&Path>) -> Result<Config> {
    let file = match path {
        Some(path) => ::config::File::from(path).required(true),
        None => {
            let config_dir = directories::ProjectDirs::from("com", "edu-platform", "edu-admin")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."));
            ::config::File::with_name(&config_dir.join("config").to_string_lossy()).required(false)
        }
    };

    let config = ::config::Config::builder()
        .set_default("port", 8080)?
        .set_default("static_dir", "dist")?
        .add_source(file)
        // EDU_ADMIN_PORT, EDU_ADMIN_CLIENT__API_BASE_URL, ...
        .add_source(
            ::config::Environment::with_prefix("EDU_ADMIN")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.toml");
        std::fs::write(&path, "").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.static_dir, PathBuf::from("dist"));
        assert_eq!(config.client, ClientConfig::default());
    }

    #[test]
    #[serial]
    fn test_file_then_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin.toml");
        std::fs::write(
            &path,
            "port = 9000\nstatic_dir = \"public\"\n\n[client]\napi_base_url = \"https://api.example.test/api\"\ndefault_page_size = 25\n",
        )
        .unwrap();

        std::env::set_var("EDU_ADMIN_PORT", "9100");
        let config = load_config_from(Some(&path));
        std::env::remove_var("EDU_ADMIN_PORT");
        let config = config.unwrap();

        assert_eq!(config.port, 9100, "environment overrides the file");
        assert_eq!(config.static_dir, PathBuf::from("public"));
        assert_eq!(config.client.api_base_url, "https://api.example.test/api");
        assert_eq!(config.client.default_page_size, 25);
        assert_eq!(config.client.session_key, "edu-admin-session");
    }

    #[test]
    #[serial]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config_from(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
