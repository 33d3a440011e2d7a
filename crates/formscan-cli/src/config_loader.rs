//! Configuration loading for CLI commands

use anyhow::{Context, Result};
use formscan_core::config::{parse_overlap_ratio, CliConfigOverrides, LayeredConfig};
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "formscan.toml";

fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let local = PathBuf::from(DEFAULT_CONFIG_FILE);
            local.is_file().then_some(local)
        }
    }
}

/// Defaults, then the config file, then `FORMSCAN_*` variables, then flags
pub fn load_config(cli: &Cli) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    if let Some(path) = config_path(cli.config.as_deref()) {
        config = config
            .load_from_file(&path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?;
    }

    let mut config = config.load_from_env();

    let min_overlap_ratio = cli
        .min_overlap
        .map(parse_overlap_ratio)
        .transpose()
        .context("Invalid --min-overlap")?;

    config.update_from_cli(CliConfigOverrides {
        min_overlap_ratio,
        server_url: cli.server.clone(),
        ..Default::default()
    });

    Ok(config)
}
