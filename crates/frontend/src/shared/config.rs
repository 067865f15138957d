//! Application configuration.
//!
//! The SPA cannot read files at runtime, so the defaults are embedded and the
//! API address can be overridden at build time with `API_BASE_URL`.

use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub routes: RoutesConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// localStorage key holding the serialized session
    pub storage_key: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RoutesConfig {
    /// Where an expired session is sent when the app cannot navigate itself
    pub login: String,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "http://localhost:8000"

[session]
storage_key = "session"

[routes]
login = "/login"
"#;

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:8000".to_string(),
            },
            session: SessionConfig {
                storage_key: "session".to_string(),
            },
            routes: RoutesConfig {
                login: "/login".to_string(),
            },
        }
    }
}

/// Parse a TOML config and apply the base URL override, if any.
pub fn parse_config(raw: &str, base_url_override: Option<&str>) -> Result<Config, toml::de::Error> {
    let mut config: Config = toml::from_str(raw)?;
    if let Some(url) = base_url_override.map(str::trim).filter(|u| !u.is_empty()) {
        config.api.base_url = url.to_string();
    }
    config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
    Ok(config)
}

fn load_config() -> Config {
    match parse_config(DEFAULT_CONFIG, option_env!("API_BASE_URL")) {
        Ok(config) => {
            log::info!("API base URL: {}", config.api.base_url);
            config
        }
        Err(e) => {
            log::error!("Embedded config is invalid, using built-in defaults: {}", e);
            Config::default()
        }
    }
}

static CONFIG: Lazy<Config> = Lazy::new(load_config);

pub fn config() -> &'static Config {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG, None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.routes.login, "/login");
    }

    #[test]
    fn test_override_replaces_base_url() {
        let config = parse_config(DEFAULT_CONFIG, Some("https://api.svan.es/")).unwrap();
        assert_eq!(config.api.base_url, "https://api.svan.es");
        assert_eq!(config.session.storage_key, "session");

        let blank = parse_config(DEFAULT_CONFIG, Some("  ")).unwrap();
        assert_eq!(blank.api.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(parse_config("[api]\nbase_url = 1", None).is_err());
    }
}
