use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // Content
    pub content_dir: PathBuf,
    pub redirects_file: Option<PathBuf>,
    pub landing_pages_file: Option<PathBuf>,

    // Greenhouse
    pub greenhouse_api_url: String,
    pub greenhouse_board: String,
    pub greenhouse_devrel_department: String,
    pub careers_timeout: Duration,

    // Admin
    pub admin_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Server
            port: match std::env::var("PORT") {
                Ok(v) => v.parse().context("PORT must be a valid port number")?,
                Err(_) => 8080,
            },

            // Content
            content_dir: std::env::var("CONTENT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("content")),
            redirects_file: optional_var("REDIRECTS_FILE").map(PathBuf::from),
            landing_pages_file: optional_var("LANDING_PAGES_FILE").map(PathBuf::from),

            // Greenhouse
            greenhouse_api_url: std::env::var("GREENHOUSE_API_URL")
                .unwrap_or_else(|_| "https://boards-api.greenhouse.io".to_string()),
            greenhouse_board: std::env::var("GREENHOUSE_BOARD")
                .unwrap_or_else(|_| "vonage".to_string()),
            greenhouse_devrel_department: std::env::var("GREENHOUSE_DEVREL_DEPARTMENT")
                .unwrap_or_else(|_| "Developer Relations".to_string()),
            careers_timeout: Duration::from_secs(
                std::env::var("CAREERS_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(5),
            ),

            // Admin
            admin_api_key: optional_var("ADMIN_API_KEY"),
        })
    }

    /// Address the HTTP server binds to.
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Reads an env var, treating unset and blank the same way.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "PORT",
        "CONTENT_DIR",
        "REDIRECTS_FILE",
        "LANDING_PAGES_FILE",
        "GREENHOUSE_API_URL",
        "GREENHOUSE_BOARD",
        "GREENHOUSE_DEVREL_DEPARTMENT",
        "CAREERS_TIMEOUT_SECS",
        "ADMIN_API_KEY",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();

        let config = Config::from_env().expect("defaults should load");

        assert_eq!(config.port, 8080);
        assert_eq!(config.content_dir, PathBuf::from("content"));
        assert!(config.redirects_file.is_none());
        assert!(config.landing_pages_file.is_none());
        assert_eq!(config.greenhouse_api_url, "https://boards-api.greenhouse.io");
        assert_eq!(config.greenhouse_board, "vonage");
        assert_eq!(config.greenhouse_devrel_department, "Developer Relations");
        assert_eq!(config.careers_timeout, Duration::from_secs(5));
        assert!(config.admin_api_key.is_none());
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("PORT", "3000");
        std::env::set_var("CONTENT_DIR", "/srv/docs");
        std::env::set_var("CAREERS_TIMEOUT_SECS", "2");
        std::env::set_var("ADMIN_API_KEY", "s3cret");
        std::env::set_var("LANDING_PAGES_FILE", "config/landing.json");

        let config = Config::from_env().expect("overrides should load");

        assert_eq!(config.port, 3000);
        assert_eq!(config.content_dir, PathBuf::from("/srv/docs"));
        assert_eq!(config.careers_timeout, Duration::from_secs(2));
        assert_eq!(config.admin_api_key.as_deref(), Some("s3cret"));
        assert_eq!(
            config.landing_pages_file,
            Some(PathBuf::from("config/landing.json"))
        );

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_port_is_an_error() {
        clear_env();
        std::env::set_var("PORT", "not-a-port");

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("PORT"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_blank_admin_key_is_treated_as_unset() {
        clear_env();
        std::env::set_var("ADMIN_API_KEY", "   ");

        let config = Config::from_env().unwrap();
        assert!(config.admin_api_key.is_none());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_unparseable_timeout_falls_back_to_default() {
        clear_env();
        std::env::set_var("CAREERS_TIMEOUT_SECS", "soon");

        let config = Config::from_env().unwrap();
        assert_eq!(config.careers_timeout, Duration::from_secs(5));

        clear_env();
    }
}
