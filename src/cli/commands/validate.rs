//! Validate config command implementation

use super::{EXIT_CONFIGURATION, EXIT_SUCCESS};
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIGURATION);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Environment: {:?}", config.application.environment);
        println!("  Instances:");
        for instance in &config.instances {
            println!(
                "    - {} ({}, user {}, timeout {}s)",
                instance.name,
                instance.api_base(),
                instance.username,
                instance.timeout_seconds
            );
        }
        println!(
            "  Strip total separators: {:?}",
            config
                .pagination
                .strip_total_separators
                .iter()
                .map(|e| e.as_str())
                .collect::<Vec<_>>()
        );
        println!(
            "  Export: {} -> {} (flatten: {}, delimiter '{}')",
            config.export.format.extension(),
            config.export.output_dir,
            config.export.flatten,
            config.export.csv_delimiter
        );
        if config.logging.local_enabled {
            println!(
                "  Log files: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }

        Ok(EXIT_SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_missing_file() {
        let code = ValidateArgs {}.execute("does-not-exist.toml").await.unwrap();
        assert_eq!(code, EXIT_CONFIGURATION);
    }

    #[tokio::test]
    async fn test_validate_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"
[[instances]]
name = "validate"
api_url = "https://erp.example.com"
username = "u"
password = "p"
"#,
        )
        .unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, EXIT_SUCCESS);
    }
}
