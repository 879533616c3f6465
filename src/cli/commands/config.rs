use crate::cli::output::Output;
use crate::cli::ConfigAction;
use crate::config::{get_config_path, Settings};
use crate::errors::Result;
use console::style;
use std::path::Path;

/// Handle configuration commands
pub async fn run(action: ConfigAction) -> Result<()> {
    let config_file = get_config_path()?;

    match action {
        ConfigAction::Set { key, value } => set_config_value(&config_file, &key, &value).await,
        ConfigAction::Get { key } => get_config_value(&config_file, &key).await,
        ConfigAction::List => list_config_values(&config_file).await,
        ConfigAction::Unset { key } => unset_config_value(&config_file, &key).await,
    }
}

async fn set_config_value(config_file: &Path, key: &str, value: &str) -> Result<()> {
    let mut settings = Settings::load_from_file(config_file)?;
    settings.set_value(key, value)?;
    settings.validate()?;
    settings.save_to_file(config_file)?;

    let shown = if key == "github.token" { "********" } else { value };
    Output::success(format!("Configuration updated: {key} = {shown}"));

    if key == "github.token" {
        Output::tip("GT_GITHUB_TOKEN or GITHUB_TOKEN take precedence over the stored token");
    }
    Ok(())
}

async fn get_config_value(config_file: &Path, key: &str) -> Result<()> {
    let settings = Settings::load_from_file(config_file)?;
    let value = settings.get_value(key)?;

    // Mask sensitive values
    let display_value = if value.is_empty() {
        "(not set)".to_string()
    } else if key.contains("token") {
        format!("{}***", value.chars().take(4).collect::<String>())
    } else {
        value
    };

    println!("{key} = {display_value}");
    Ok(())
}

async fn list_config_values(config_file: &Path) -> Result<()> {
    let settings = Settings::load_from_file(config_file)?;

    Output::section(format!("Configuration ({})", config_file.display()));
    for (key, value) in settings.entries() {
        let value = if value.is_empty() {
            style("(not set)".to_string()).dim()
        } else {
            style(value)
        };
        println!("  {key} = {value}");
    }
    Ok(())
}

async fn unset_config_value(config_file: &Path, key: &str) -> Result<()> {
    let mut settings = Settings::load_from_file(config_file)?;
    settings.unset_value(key)?;
    settings.save_to_file(config_file)?;

    Output::success(format!("Configuration value unset: {key}"));
    Ok(())
}
