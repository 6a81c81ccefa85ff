//! Config command handlers.

use anyhow::{Context, Result};
use notehub_core::api::ApiClient;
use notehub_core::config;

pub fn path() {
    println!("{}", config::paths::config_path().display());
}

pub fn init() -> Result<()> {
    let config_path = config::paths::config_path();
    config::Config::init(&config_path)
        .with_context(|| format!("init config at {}", config_path.display()))?;
    println!("Created config at {}", config_path.display());
    Ok(())
}

pub fn set_server(url: &str) -> Result<()> {
    // Reject what the client could never use
    let client = ApiClient::new(url, None).context("validate server URL")?;
    config::Config::save_server_url(client.base_url()).context("save server URL")?;
    println!("Server set to {}", client.base_url());
    Ok(())
}
