//! `uddr config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;

pub fn execute(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(),
        ConfigCommands::Set { key, value } => set_config(&key, &value),
        ConfigCommands::Path => show_path(),
    }
}

fn mask(secret: &str) -> String {
    if secret.len() > 8 {
        format!("{}...{}", &secret[..4], &secret[secret.len() - 4..])
    } else {
        "****".to_string()
    }
}

fn show_config() -> Result<()> {
    let config = Config::load()?;
    let masked = Config {
        api_key: config.api_key.as_deref().map(mask),
        ..config
    };

    let unset = || "(not set)".dimmed().to_string();
    println!("{}", "Current Configuration:".bold());
    println!();
    println!("  {} {}", "api_key:".bold(), masked.api_key.unwrap_or_else(unset));
    println!("  {} {}", "organization:".bold(), masked.organization.unwrap_or_else(unset));
    println!("  {} {}", "client_id:".bold(), masked.client_id.unwrap_or_else(unset));
    println!(
        "  {} {}",
        "output_format:".bold(),
        masked.output_format.unwrap_or_default()
    );

    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    println!("{} {} set.", "Success:".green().bold(), key.cyan());
    Ok(())
}

fn show_path() -> Result<()> {
    let path = Config::path()?;
    println!("{}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(mask("abcdefghijkl"), "abcd...ijkl");
        assert_eq!(mask("short"), "****");
    }
}
