//! `brlfx setup`: seeds the user config directory with the documented example.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::core::config::AppConfig;

const EXAMPLE_CONFIG: &str = include_str!("../../docs/example_config.yaml");

pub fn setup() -> Result<()> {
    let path = write_example_config(AppConfig::default_config_path()?)?;
    println!("Wrote example configuration to {}", path.display());
    Ok(())
}

/// Never overwrites an existing file. Missing parent directories are created.
pub fn write_example_config(path: impl Into<PathBuf>) -> Result<PathBuf> {
    let path = path.into();
    if path.exists() {
        bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    fs::write(&path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    info!(path = %path.display(), "Created example configuration");
    Ok(path)
}
