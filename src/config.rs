//! Configuration loading and constants.
//!
//! Server settings come from a TOML file (`AppConfig`). The values the page
//! displays and the backend root it checks come from the process environment
//! and are resolved once into a `FrontendEnv`, which is then passed explicitly
//! to the status panel and the page templates.

use const_format::formatcp;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// =============================================================================
// HTTP Response Cache Control
// =============================================================================

/// Static assets (CSS, healthz.txt) - short cache, the files ship with the build
pub const HTTP_CACHE_STATIC_MAX_AGE: u32 = 3600;

/// Error responses - short TTL so a fixed template shows up quickly
pub const HTTP_CACHE_ERROR_MAX_AGE: u32 = 5;

/// The page embeds the live status line and must be revalidated on every load
pub const CACHE_CONTROL_PAGE: &str = "no-cache";

pub const CACHE_CONTROL_STATIC: &str = formatcp!("public, max-age={}", HTTP_CACHE_STATIC_MAX_AGE);

pub const CACHE_CONTROL_ERROR: &str = formatcp!("public, max-age={}", HTTP_CACHE_ERROR_MAX_AGE);

// =============================================================================
// Environment Variables
// =============================================================================

/// Preferred backend root URL
pub const ENV_API_BASE: &str = "REACT_APP_API_BASE";

/// Fallback backend root URL, used when `REACT_APP_API_BASE` is unset or empty
pub const ENV_BACKEND_URL: &str = "REACT_APP_BACKEND_URL";

/// WebSocket URL (displayed only)
pub const ENV_WS_URL: &str = "REACT_APP_WS_URL";

/// Public frontend URL (displayed only)
pub const ENV_FRONTEND_URL: &str = "REACT_APP_FRONTEND_URL";

/// Rendered in place of an environment value that is not set
pub const NOT_SET_PLACEHOLDER: &str = "(not set)";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default directory holding the tera templates
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// Default directory for the public assets folder
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Health marker file inside the public assets folder
pub const HEALTHZ_FILE: &str = "healthz.txt";

/// Default site title
pub const DEFAULT_SITE_NAME: &str = "VizAI Animal Behavior Analytics";

/// Default footer text
pub const DEFAULT_FOOTER: &str = "Ocean Professional theme";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "vizai_frontend=debug,tower_http=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub http: HttpServerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    /// Template and asset locations
    #[serde(default)]
    pub paths: PathsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// Title shown in the page header
    #[serde(default = "UiConfig::default_site_name")]
    pub site_name: String,
    #[serde(default = "UiConfig::default_footer")]
    pub footer: String,
    /// Version string, populated at runtime
    #[serde(skip_deserializing, default = "UiConfig::default_version")]
    pub version: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            site_name: Self::default_site_name(),
            footer: Self::default_footer(),
            version: Self::default_version(),
        }
    }
}

impl UiConfig {
    fn default_site_name() -> String {
        DEFAULT_SITE_NAME.to_string()
    }

    fn default_footer() -> String {
        DEFAULT_FOOTER.to_string()
    }

    fn default_version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "PathsConfig::default_templates_dir")]
    pub templates_dir: PathBuf,
    #[serde(default = "PathsConfig::default_public_dir")]
    pub public_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            templates_dir: Self::default_templates_dir(),
            public_dir: Self::default_public_dir(),
        }
    }
}

impl PathsConfig {
    fn default_templates_dir() -> PathBuf {
        PathBuf::from(DEFAULT_TEMPLATES_DIR)
    }

    fn default_public_dir() -> PathBuf {
        PathBuf::from(DEFAULT_PUBLIC_DIR)
    }

    /// Glob that tera loads templates from
    pub fn template_glob(&self) -> String {
        format!("{}/**/*.html", self.templates_dir.display())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;

        match config.logging.format.to_ascii_lowercase().as_str() {
            "text" | "json" => {}
            other => {
                return Err(ConfigError::Validation(format!(
                    "Unknown logging.format '{}', expected \"text\" or \"json\"",
                    other
                )))
            }
        }

        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Frontend values resolved from the environment.
///
/// Empty variables count as unset. The backend root prefers
/// `REACT_APP_API_BASE` and falls back to `REACT_APP_BACKEND_URL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrontendEnv {
    pub api_base: Option<String>,
    pub ws_url: Option<String>,
    pub frontend_url: Option<String>,
}

impl FrontendEnv {
    /// Resolve from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve through an arbitrary lookup, so callers can supply a fixed map.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Self {
            api_base: non_empty(ENV_API_BASE).or_else(|| non_empty(ENV_BACKEND_URL)),
            ws_url: non_empty(ENV_WS_URL),
            frontend_url: non_empty(ENV_FRONTEND_URL),
        }
    }

    /// Display rows for the environment list, in page order.
    pub fn display_rows(&self) -> Vec<(&'static str, &str)> {
        fn shown(value: &Option<String>) -> &str {
            value.as_deref().unwrap_or(NOT_SET_PLACEHOLDER)
        }

        vec![
            ("API Base", shown(&self.api_base)),
            ("WebSocket", shown(&self.ws_url)),
            ("Frontend URL", shown(&self.frontend_url)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_api_base_preferred_over_backend_url() {
        let env = FrontendEnv::from_lookup(lookup_from(&[
            (ENV_API_BASE, "http://api:3001"),
            (ENV_BACKEND_URL, "http://backend:3001"),
        ]));
        assert_eq!(env.api_base.as_deref(), Some("http://api:3001"));
    }

    #[test]
    fn test_backend_url_fallback() {
        let env =
            FrontendEnv::from_lookup(lookup_from(&[(ENV_BACKEND_URL, "http://backend:3001")]));
        assert_eq!(env.api_base.as_deref(), Some("http://backend:3001"));
    }

    #[test]
    fn test_empty_api_base_falls_through() {
        let env = FrontendEnv::from_lookup(lookup_from(&[
            (ENV_API_BASE, ""),
            (ENV_BACKEND_URL, "http://backend:3001"),
        ]));
        assert_eq!(env.api_base.as_deref(), Some("http://backend:3001"));
    }

    #[test]
    fn test_display_rows_use_placeholder() {
        let env = FrontendEnv::from_lookup(lookup_from(&[(ENV_WS_URL, "ws://api:3001/ws/events")]));
        assert_eq!(
            env.display_rows(),
            vec![
                ("API Base", NOT_SET_PLACEHOLDER),
                ("WebSocket", "ws://api:3001/ws/events"),
                ("Frontend URL", NOT_SET_PLACEHOLDER),
            ]
        );
    }

    #[test]
    fn test_load_minimal_config_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[http]\nhost = \"127.0.0.1\"\nport = 3000").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.ui.site_name, DEFAULT_SITE_NAME);
        assert_eq!(config.ui.footer, DEFAULT_FOOTER);
        assert_eq!(config.paths.public_dir, PathBuf::from(DEFAULT_PUBLIC_DIR));
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let err = AppConfig::parse(
            "[http]\nhost = \"0.0.0.0\"\nport = 3000\n[logging]\nformat = \"xml\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AppConfig::load("/nonexistent/vizai.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
