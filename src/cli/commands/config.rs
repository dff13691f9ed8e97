use crate::cli::args::{ConfigArgs, ConfigCommand};
use crate::config::Config;
use crate::credentials::API_KEY;
use crate::error::Result;

/// Execute config command
pub fn execute(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("✅ Configuration updated: {} = {}", key, display_value(&key, &value));
            Ok(())
        }
        ConfigCommand::Get { key } => {
            let config = Config::load()?;
            match config.get(&key) {
                Some(value) => {
                    println!("{}: {}", key, display_value(&key, &value));
                }
                None => {
                    println!("Configuration key '{}' not found", key);
                }
            }
            Ok(())
        }
        ConfigCommand::Path => {
            let path = Config::config_file_path()?;
            println!("Configuration file: {}", path.display());
            Ok(())
        }
        ConfigCommand::Init => {
            Config::initialize()?;
            println!("✅ Configuration initialized");
            println!();
            println!("To set your API token, run:");
            println!("  gws config set api.key YOUR_TOKEN");
            println!();
            println!("Get your token from: https://www.globalwinescore.com/api/");
            Ok(())
        }
    }
}

fn display_value(key: &str, value: &str) -> String {
    if key == API_KEY {
        mask_value(value)
    } else {
        value.to_string()
    }
}

/// Mask sensitive values for display
fn mask_value(value: &str) -> String {
    let total = value.chars().count();
    if total > 10 {
        let prefix: String = value.chars().take(4).collect();
        format!("{}...({} characters)", prefix, total)
    } else {
        "*".repeat(total)
    }
}
