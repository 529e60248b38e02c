//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

/// Which document store backs the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Google Cloud Firestore (or the emulator when FIRESTORE_EMULATOR_HOST is set)
    Firestore,
    /// Process-local store, lost on exit
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(Self::Firestore),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::Invalid {
                name: "OCTOFIT_STORAGE",
                value: other.to_string(),
            }),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// GitHub Codespace name, used to build the public base URL
    pub codespace_name: Option<String>,
    /// Storage backend
    pub storage: StorageBackend,
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8000,
            codespace_name: None,
            storage: StorageBackend::Memory,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match env::var("PORT") {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            Err(_) => 8000,
        };

        let storage = match env::var("OCTOFIT_STORAGE") {
            Ok(raw) => raw.parse()?,
            Err(_) => StorageBackend::Firestore,
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port,
            codespace_name: env::var("CODESPACE_NAME")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            storage,
        })
    }

    /// Public base URL of the API.
    ///
    /// Inside a Codespace the forwarded port 8000 is exposed on
    /// `app.github.dev`; elsewhere the server is reached on localhost.
    pub fn base_url(&self) -> String {
        match &self.codespace_name {
            Some(name) => format!("https://{}-8000.app.github.dev", name),
            None => format!("http://localhost:{}", self.port),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("PORT", "8123");
        env::set_var("OCTOFIT_STORAGE", "memory");
        env::set_var("CODESPACE_NAME", "  ");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.port, 8123);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.codespace_name, None);

        env::set_var("PORT", "not-a-port");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));

        env::remove_var("PORT");
        env::remove_var("OCTOFIT_STORAGE");
        env::remove_var("CODESPACE_NAME");
    }

    #[test]
    fn test_storage_backend_parse() {
        assert_eq!(
            "Firestore".parse::<StorageBackend>().unwrap(),
            StorageBackend::Firestore
        );
        assert_eq!(
            " memory ".parse::<StorageBackend>().unwrap(),
            StorageBackend::Memory
        );
        assert!("mongodb".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_base_url() {
        let mut config = Config::test_default();
        assert_eq!(config.base_url(), "http://localhost:8000");

        config.codespace_name = Some("fluffy-space-waddle".to_string());
        assert_eq!(
            config.base_url(),
            "https://fluffy-space-waddle-8000.app.github.dev"
        );
    }
}
