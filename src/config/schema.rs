//! Configuration schema types

use crate::adapters::chess::Endpoint;
use crate::config::{secret_string, SecretString};
use crate::domain::{ChessError, Result};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Testing,
    Production,
}

/// Root configuration, mapped from the TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChessConfig {
    #[serde(default)]
    pub application: ApplicationConfig,

    /// ERP instances (tenants); each gets its own session
    #[serde(default)]
    pub instances: Vec<InstanceConfig>,

    #[serde(default)]
    pub pagination: PaginationConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ChessConfig {
    /// Loads, substitutes, overrides and validates a config file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        super::load_config(path)
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.application.validate()?;

        if self.instances.is_empty() {
            return Err("At least one [[instances]] entry is required".to_string());
        }

        let mut names = HashSet::new();
        for instance in &self.instances {
            instance.validate()?;
            if !names.insert(instance.name.as_str()) {
                return Err(format!("Duplicate instance name '{}'", instance.name));
            }
        }

        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Instance by name, or the only configured one when `name` is `None`
    pub fn instance(&self, name: Option<&str>) -> Result<&InstanceConfig> {
        match name {
            Some(name) => self
                .instances
                .iter()
                .find(|i| i.name == name)
                .ok_or_else(|| {
                    ChessError::Configuration(format!(
                        "Unknown instance '{name}'. Configured: {}",
                        self.instance_names().join(", ")
                    ))
                }),
            None => match self.instances.as_slice() {
                [only] => Ok(only),
                [] => Err(ChessError::Configuration("No instances configured".to_string())),
                _ => Err(ChessError::Configuration(format!(
                    "Several instances configured ({}); pick one with --instance",
                    self.instance_names().join(", ")
                ))),
            },
        }
    }

    pub fn instance_names(&self) -> Vec<&str> {
        self.instances.iter().map(|i| i.name.as_str()).collect()
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub environment: Environment,
}

impl ApplicationConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            environment: Environment::default(),
        }
    }
}

/// One ChessERP server and its credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceConfig {
    /// Short tenant name used in logs and output file names
    pub name: String,

    /// Server root, e.g. `https://erp.example.com`
    pub api_url: String,

    pub username: String,

    /// Zeroized on drop, redacted in Debug
    pub password: SecretString,

    /// Per-request timeout in seconds (1..=300)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    #[serde(default = "default_api_path")]
    pub api_path: String,

    #[serde(default = "default_login_path")]
    pub login_path: String,
}

impl InstanceConfig {
    /// Instance with default paths and timeout
    pub fn new(name: &str, api_url: &str, username: &str, password: &str) -> Self {
        Self {
            name: name.to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: secret_string(password),
            timeout_seconds: default_timeout_seconds(),
            api_path: default_api_path(),
            login_path: default_login_path(),
        }
    }

    /// Builds an instance from `{prefix}API_URL`, `{prefix}USERNAME` and `{prefix}PASSWORD`
    ///
    /// The instance name is the prefix without its trailing underscore,
    /// lower-cased (`CHESS_S_` becomes `chess_s`).
    ///
    /// # Errors
    ///
    /// Returns a configuration error listing every missing variable.
    pub fn from_env(prefix: &str) -> Result<Self> {
        let keys = ["API_URL", "USERNAME", "PASSWORD"];
        let mut values = Vec::with_capacity(keys.len());
        let mut missing = Vec::new();

        for key in keys {
            let var = format!("{prefix}{key}");
            match std::env::var(&var) {
                Ok(value) if !value.trim().is_empty() => values.push(value),
                _ => missing.push(var),
            }
        }

        if !missing.is_empty() {
            return Err(ChessError::Configuration(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let name = prefix.trim_end_matches('_').to_lowercase();
        let instance = Self::new(&name, &values[0], &values[1], &values[2]);
        instance.validate().map_err(ChessError::Configuration)?;
        Ok(instance)
    }

    /// Base URL for data endpoints, always ending in `/`
    pub fn api_base(&self) -> String {
        let root = self.api_url.trim_end_matches('/');
        let path = self.api_path.trim_matches('/');
        if path.is_empty() {
            format!("{root}/")
        } else {
            format!("{root}/{path}/")
        }
    }

    pub fn login_url(&self) -> String {
        let root = self.api_url.trim_end_matches('/');
        let path = self.login_path.trim_matches('/');
        format!("{root}/{path}")
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("instances.name cannot be empty".to_string());
        }

        let context = format!("instance '{}'", self.name);

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(format!("{context}: api_url must start with http:// or https://"));
        }
        url::Url::parse(&self.api_url)
            .map_err(|e| format!("{context}: invalid api_url '{}': {e}", self.api_url))?;

        if self.username.trim().is_empty() {
            return Err(format!("{context}: username cannot be empty"));
        }
        if self.password.expose_secret().is_blank() {
            return Err(format!("{context}: password cannot be empty"));
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > 300 {
            return Err(format!(
                "{context}: timeout_seconds must be between 1 and 300, got {}",
                self.timeout_seconds
            ));
        }
        Ok(())
    }

    /// Drops the trailing `/` from `api_url`
    pub(crate) fn normalize(&mut self) {
        let trimmed = self.api_url.trim().trim_end_matches('/').to_string();
        self.api_url = trimmed;
    }
}

/// Lot counter handling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Endpoints whose counter total may carry thousands separators
    #[serde(default = "default_strip_total_separators")]
    pub strip_total_separators: Vec<Endpoint>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            strip_total_separators: default_strip_total_separators(),
        }
    }
}

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(ChessError::Configuration(format!(
                "Invalid export format '{s}'. Must be one of: csv, json"
            ))),
        }
    }
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    #[serde(default)]
    pub format: OutputFormat,

    /// Denormalize nested children into one row per leaf
    #[serde(default = "default_true")]
    pub flatten: bool,

    #[serde(default = "default_csv_delimiter")]
    pub csv_delimiter: String,
}

impl ExportConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.output_dir.trim().is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }
        self.delimiter_byte().map(|_| ())
    }

    /// CSV delimiter as a single byte
    pub fn delimiter_byte(&self) -> std::result::Result<u8, String> {
        match self.csv_delimiter.as_bytes() {
            [b] => Ok(*b),
            _ => Err(format!(
                "export.csv_delimiter must be a single ASCII character, got '{}'",
                self.csv_delimiter
            )),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            format: OutputFormat::default(),
            flatten: true,
            csv_delimiter: default_csv_delimiter(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_api_path() -> String {
    "/web/api/chess/v1/".to_string()
}

fn default_login_path() -> String {
    "/web/api/chess/v1/auth/login".to_string()
}

fn default_strip_total_separators() -> Vec<Endpoint> {
    vec![Endpoint::Sales]
}

fn default_output_dir() -> String {
    "data".to_string()
}

fn default_csv_delimiter() -> String {
    ";".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(instances: Vec<InstanceConfig>) -> ChessConfig {
        ChessConfig {
            application: ApplicationConfig::default(),
            instances,
            pagination: PaginationConfig::default(),
            export: ExportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_instance_urls() {
        let instance = InstanceConfig::new("s", "https://erp.example.com/", "u", "p");
        assert_eq!(instance.api_url, "https://erp.example.com");
        assert_eq!(instance.api_base(), "https://erp.example.com/web/api/chess/v1/");
        assert_eq!(
            instance.login_url(),
            "https://erp.example.com/web/api/chess/v1/auth/login"
        );
    }

    #[test]
    fn test_custom_login_path_trailing_slash() {
        let mut instance = InstanceConfig::new("s", "http://erp.local", "u", "p");
        instance.login_path = "/auth/login/".to_string();
        instance.api_path = "api".to_string();
        assert_eq!(instance.login_url(), "http://erp.local/auth/login");
        assert_eq!(instance.api_base(), "http://erp.local/api/");
    }

    #[test]
    fn test_instance_validation() {
        let ok = InstanceConfig::new("s", "https://erp.example.com", "u", "p");
        assert!(ok.validate().is_ok());

        let bad_scheme = InstanceConfig::new("s", "ftp://erp.example.com", "u", "p");
        assert!(bad_scheme.validate().is_err());

        let no_password = InstanceConfig::new("s", "https://erp.example.com", "u", " ");
        assert!(no_password.validate().unwrap_err().contains("password"));

        let mut slow = InstanceConfig::new("s", "https://erp.example.com", "u", "p");
        slow.timeout_seconds = 301;
        assert!(slow.validate().unwrap_err().contains("timeout_seconds"));
    }

    #[test]
    fn test_config_requires_unique_instances() {
        assert!(config_with(vec![]).validate().is_err());

        let a = InstanceConfig::new("s", "https://a.example.com", "u", "p");
        let b = InstanceConfig::new("s", "https://b.example.com", "u", "p");
        let err = config_with(vec![a, b]).validate().unwrap_err();
        assert!(err.contains("Duplicate"));
    }

    #[test]
    fn test_instance_lookup() {
        let a = InstanceConfig::new("s", "https://a.example.com", "u", "p");
        let b = InstanceConfig::new("t", "https://b.example.com", "u", "p");
        let config = config_with(vec![a.clone()]);
        assert_eq!(config.instance(None).unwrap().name, "s");

        let config = config_with(vec![a, b]);
        assert!(config.instance(None).is_err());
        assert_eq!(config.instance(Some("t")).unwrap().name, "t");
        assert!(config.instance(Some("x")).is_err());
    }

    #[test]
    fn test_export_delimiter() {
        let mut export = ExportConfig::default();
        assert_eq!(export.delimiter_byte().unwrap(), b';');
        export.csv_delimiter = "||".to_string();
        assert!(export.validate().is_err());
    }

    #[test]
    fn test_logging_rotation_validation() {
        let mut logging = LoggingConfig::default();
        assert!(logging.validate().is_ok());
        logging.local_rotation = "size".to_string();
        assert!(logging.validate().is_err());
    }

    #[test]
    fn test_pagination_rejects_unknown_endpoint() {
        let parsed: std::result::Result<PaginationConfig, _> =
            toml::from_str(r#"strip_total_separators = ["sales", "invoices"]"#);
        assert!(parsed.is_err());

        let parsed: PaginationConfig =
            toml::from_str(r#"strip_total_separators = ["sales", "articles"]"#).unwrap();
        assert_eq!(
            parsed.strip_total_separators,
            vec![Endpoint::Sales, Endpoint::Articles]
        );
    }

    #[test]
    fn test_from_env_lists_missing_vars() {
        std::env::remove_var("CHESS_FROMENV_API_URL");
        std::env::remove_var("CHESS_FROMENV_USERNAME");
        std::env::set_var("CHESS_FROMENV_PASSWORD", "secret");

        let err = InstanceConfig::from_env("CHESS_FROMENV_").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("CHESS_FROMENV_API_URL"));
        assert!(message.contains("CHESS_FROMENV_USERNAME"));
        assert!(!message.contains("CHESS_FROMENV_PASSWORD"));

        std::env::set_var("CHESS_FROMENV_API_URL", "https://erp.example.com/");
        std::env::set_var("CHESS_FROMENV_USERNAME", "api_user");
        let instance = InstanceConfig::from_env("CHESS_FROMENV_").unwrap();
        assert_eq!(instance.name, "chess_fromenv");
        assert_eq!(instance.api_url, "https://erp.example.com");

        std::env::remove_var("CHESS_FROMENV_API_URL");
        std::env::remove_var("CHESS_FROMENV_USERNAME");
        std::env::remove_var("CHESS_FROMENV_PASSWORD");
    }
}
