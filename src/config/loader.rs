//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ChessConfig;
use super::secret_string;
use crate::domain::{ChessError, Result};
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`ChessConfig`]
/// 4. Applies environment variable overrides (`CHESS_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`ChessError::Configuration`] if the file is missing or unreadable,
/// a referenced variable is unset, the TOML is malformed or validation fails.
///
/// # Examples
///
/// ```no_run
/// use chess_erp::config::load_config;
///
/// let config = load_config("chess.toml").expect("Failed to load config");
/// println!("{} instance(s)", config.instances.len());
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ChessConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ChessError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ChessError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ChessConfig = toml::from_str(&contents)
        .map_err(|e| ChessError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    for instance in &mut config.instances {
        instance.normalize();
    }

    config.validate().map_err(|e| {
        ChessError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    tracing::debug!(
        path = %path.display(),
        instances = ?config.instance_names(),
        "Configuration loaded"
    );
    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ChessError::Configuration(format!("Invalid placeholder pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ChessError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the `CHESS_*` prefix
///
/// Section keys follow `CHESS_<SECTION>_<KEY>` (e.g. `CHESS_EXPORT_FORMAT`);
/// instance credentials follow `CHESS_<INSTANCE>_<KEY>` with the instance
/// name upper-cased (e.g. `CHESS_S_PASSWORD`).
fn apply_env_overrides(config: &mut ChessConfig) {
    if let Ok(val) = std::env::var("CHESS_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    for instance in &mut config.instances {
        let prefix = format!("CHESS_{}_", instance.name.to_uppercase());
        if let Ok(val) = std::env::var(format!("{prefix}API_URL")) {
            instance.api_url = val;
        }
        if let Ok(val) = std::env::var(format!("{prefix}USERNAME")) {
            instance.username = val;
        }
        if let Ok(val) = std::env::var(format!("{prefix}PASSWORD")) {
            instance.password = secret_string(val);
        }
        if let Ok(val) = std::env::var(format!("{prefix}TIMEOUT_SECONDS")) {
            if let Ok(timeout) = val.parse() {
                instance.timeout_seconds = timeout;
            }
        }
    }

    if let Ok(val) = std::env::var("CHESS_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }
    if let Ok(val) = std::env::var("CHESS_EXPORT_FORMAT") {
        if let Ok(format) = val.parse() {
            config.export.format = format;
        }
    }
    if let Ok(val) = std::env::var("CHESS_EXPORT_FLATTEN") {
        config.export.flatten = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("CHESS_EXPORT_CSV_DELIMITER") {
        config.export.csv_delimiter = val;
    }

    if let Ok(val) = std::env::var("CHESS_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CHESS_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("CHESS_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("CHESS_LOADER_TEST_VAR", "test_value");
        let result = substitute_env_vars("password = \"${CHESS_LOADER_TEST_VAR}\"").unwrap();
        assert_eq!(result, "password = \"test_value\"\n");
        std::env::remove_var("CHESS_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("CHESS_LOADER_MISSING_A");
        std::env::remove_var("CHESS_LOADER_MISSING_B");
        let input = "a = \"${CHESS_LOADER_MISSING_A}\"\nb = \"${CHESS_LOADER_MISSING_B}\"";
        let err = substitute_env_vars(input).unwrap_err().to_string();
        assert!(err.contains("CHESS_LOADER_MISSING_A"));
        assert!(err.contains("CHESS_LOADER_MISSING_B"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("CHESS_LOADER_COMMENTED");
        let input = "# password = \"${CHESS_LOADER_COMMENTED}\"\nname = \"x\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("nonexistent-chess.toml").unwrap_err();
        assert!(matches!(err, ChessError::Configuration(_)));
    }

    #[test]
    fn test_load_config_valid() {
        let file = write_config(
            r#"
[application]
log_level = "debug"

[[instances]]
name = "loader"
api_url = "https://erp.example.com/"
username = "api_user"
password = "secret"

[export]
format = "json"
flatten = false
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.instances.len(), 1);
        assert_eq!(config.instances[0].api_url, "https://erp.example.com");
        assert_eq!(config.instances[0].timeout_seconds, 30);
        assert_eq!(config.instances[0].password.expose_secret(), "secret");
        assert_eq!(config.export.format, OutputFormat::Json);
        assert!(!config.export.flatten);
        assert_eq!(config.export.csv_delimiter, ";");
    }

    #[test]
    fn test_load_config_instance_env_override() {
        std::env::set_var("CHESS_OVERRIDE_PASSWORD", "from-env");
        let file = write_config(
            r#"
[[instances]]
name = "override"
api_url = "https://erp.example.com"
username = "api_user"
password = "from-file"
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.instances[0].password.expose_secret(), "from-env");
        std::env::remove_var("CHESS_OVERRIDE_PASSWORD");
    }

    #[test]
    fn test_load_config_invalid_timeout() {
        let file = write_config(
            r#"
[[instances]]
name = "slow"
api_url = "https://erp.example.com"
username = "api_user"
password = "secret"
timeout_seconds = 0
"#,
        );

        let err = load_config(file.path()).unwrap_err().to_string();
        assert!(err.contains("timeout_seconds"));
    }
}
