//! Check command implementation
//!
//! Logs in to one instance, or to every configured instance when none is
//! selected, and reports the result.

use super::{exit_code, InstanceArgs, EXIT_SUCCESS};
use crate::adapters::chess::ChessClient;
use crate::config::{load_config, InstanceConfig, PaginationConfig};
use clap::Args;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub instance: InstanceArgs,
}

impl CheckArgs {
    /// Execute the check command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (instances, pagination) = match self.targets(config_path) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("{e}");
                return Ok(exit_code(&e));
            }
        };

        println!("🔍 Checking {} instance(s)", instances.len());
        println!();

        let mut worst = EXIT_SUCCESS;
        for instance in instances {
            let name = instance.name.clone();
            let url = instance.login_url();
            let result = match ChessClient::new(instance, &pagination) {
                Ok(mut client) => client.login().await.map(|_| ()),
                Err(e) => Err(e),
            };

            match result {
                Ok(()) => println!("  ✅ {name}: login succeeded ({url})"),
                Err(e) => {
                    tracing::error!(instance = %name, error = %e, "Check failed");
                    println!("  ❌ {name}: {e}");
                    worst = worst.max(exit_code(&e));
                }
            }
        }

        Ok(worst)
    }

    fn targets(
        &self,
        config_path: &str,
    ) -> crate::domain::Result<(Vec<InstanceConfig>, PaginationConfig)> {
        if self.instance.instance.is_some() || self.instance.env_prefix.is_some() {
            let target = self.instance.resolve(config_path)?;
            return Ok((vec![target.instance], target.pagination));
        }
        let config = load_config(config_path)?;
        Ok((config.instances, config.pagination))
    }
}
