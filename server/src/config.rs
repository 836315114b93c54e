//! Host server settings, read once from the environment at startup.
//!
//! | Variable               | Default                       |
//! |------------------------|-------------------------------|
//! | `CONSOLE_HOST`         | `127.0.0.1`                   |
//! | `CONSOLE_PORT`         | `8080`                        |
//! | `PIPELINE_API_URL`     | `http://localhost:8000/api`   |
//! | `MASTER_PROJECT_ID`    | unset                         |
//! | `CONSOLE_OPEN_BROWSER` | `true`                        |

use common::api::{RuntimeConfig, DEFAULT_API_BASE_URL};
use std::env;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub open_browser: bool,
    pub runtime: RuntimeConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match non_empty("CONSOLE_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| format!("CONSOLE_PORT '{}' is not a valid port: {}", raw, e))?,
            None => 8080,
        };

        let open_browser = match non_empty("CONSOLE_OPEN_BROWSER") {
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => return Err(format!("CONSOLE_OPEN_BROWSER '{}' is not a boolean", raw)),
            },
            None => true,
        };

        let api_base_url = non_empty("PIPELINE_API_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(format!(
                "PIPELINE_API_URL '{}' must start with http:// or https://",
                api_base_url
            ));
        }

        Ok(Self {
            host: non_empty("CONSOLE_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            open_browser,
            runtime: RuntimeConfig {
                api_base_url: api_base_url.trim_end_matches('/').to_string(),
                master_project_id: non_empty("MASTER_PROJECT_ID"),
            },
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.url(), "http://127.0.0.1:8080");
        assert!(config.open_browser);
        assert_eq!(config.runtime, RuntimeConfig::default());
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("CONSOLE_PORT", "9001"),
            ("CONSOLE_OPEN_BROWSER", "no"),
            ("PIPELINE_API_URL", "https://pipeline.example.com/api/"),
            ("MASTER_PROJECT_ID", "m-42"),
        ])
        .unwrap();
        assert_eq!(config.port, 9001);
        assert!(!config.open_browser);
        assert_eq!(config.runtime.api_base_url, "https://pipeline.example.com/api");
        assert_eq!(config.runtime.master_project_id.as_deref(), Some("m-42"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(config(&[("CONSOLE_PORT", "eighty")]).is_err());
        assert!(config(&[("CONSOLE_OPEN_BROWSER", "maybe")]).is_err());
        assert!(config(&[("PIPELINE_API_URL", "ftp://x")]).is_err());
    }
}
