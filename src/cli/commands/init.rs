//! Init command implementation
//!
//! Writes a sample configuration file.

use super::{EXIT_CONFIGURATION, EXIT_FATAL, EXIT_SUCCESS};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "chess.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIGURATION);
        }

        match fs::write(&self.output, Self::sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your instance URL and user", self.output);
                println!("  2. Put CHESS_S_PASSWORD=... in a .env file");
                println!("  3. Validate: chess-erp validate-config");
                println!("  4. Check the login: chess-erp check");
                println!("  5. Fetch: chess-erp fetch stock");
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    fn sample_config() -> &'static str {
        r#"# ChessERP client configuration

[application]
# trace | debug | info | warn | error
log_level = "info"
# development | testing | production
environment = "development"

# One block per ERP instance; each keeps its own session
[[instances]]
name = "s"
api_url = "https://erp.example.com"
username = "api_user"
password = "${CHESS_S_PASSWORD}"
timeout_seconds = 30
# api_path = "/web/api/chess/v1/"
# login_path = "/web/api/chess/v1/auth/login"

[pagination]
# Endpoints whose lot counter total may carry thousands separators
strip_total_separators = ["sales"]

[export]
output_dir = "data"
# csv | json
format = "csv"
# one row per nested child instead of nested JSON columns
flatten = true
csv_delimiter = ";"

[logging]
local_enabled = false
local_path = "logs"
# daily | hourly | never
local_rotation = "daily"
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChessConfig;
    use tempfile::TempDir;

    #[test]
    fn test_sample_config_parses() {
        let contents = InitArgs::sample_config().replace("${CHESS_S_PASSWORD}", "sample");
        let config: ChessConfig = toml::from_str(&contents).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.instances[0].name, "s");
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chess.toml");
        fs::write(&path, "existing").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), EXIT_CONFIGURATION);
        assert_eq!(fs::read_to_string(&path).unwrap(), "existing");

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            force: true,
        };
        assert_eq!(args.execute().await.unwrap(), EXIT_SUCCESS);
        assert!(fs::read_to_string(&path).unwrap().contains("[[instances]]"));
    }
}
