//! `intake config`: print the resolved configuration.

use console::style;

use crate::state::AppState;

/// Print the configuration as TOML (or JSON). The API key itself is never
/// printed, only whether its environment variable is set.
pub fn show_config(state: &AppState, json: bool) -> anyhow::Result<()> {
    let key_env = state.config.model.api_key_env();
    let key_present = std::env::var(key_env).is_ok_and(|v| !v.trim().is_empty());

    if json {
        let output = serde_json::json!({
            "data_dir": state.data_dir.display().to_string(),
            "config_path": state.config_path.display().to_string(),
            "config_exists": state.config_path.exists(),
            "api_key_env": key_env,
            "api_key_present": key_present,
            "config": state.config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    println!("  {}  {}", style("Data dir:").bold(), state.data_dir.display());
    let exists = if state.config_path.exists() {
        style("").dim()
    } else {
        style(" (not found, using defaults)").dim()
    };
    println!(
        "  {}    {}{}",
        style("Config:").bold(),
        state.config_path.display(),
        exists
    );
    let key_status = if key_present {
        style("set").green()
    } else {
        style("missing").red()
    };
    println!("  {}   {} ({})", style("API key:").bold(), key_env, key_status);
    println!();
    println!("{}", toml::to_string_pretty(&state.config)?);

    Ok(())
}
