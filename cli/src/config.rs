// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use tokio::fs;

use diario_client::ApiConfig;
use diario_core::{APP_NAME, Config as CoreConfig};

const DIARIO_CONFIG_ENV: &str = "DIARIO_CONFIG";
const DIARIO_DEV_ENV: &str = "DIARIO_DEV";

const DIARIO_DEV_VALID_TRUE: &[&str] = &["1", "true", "yes"];
const DIARIO_DEV_VALID_FALSE: &[&str] = &["0", "false", "no"];

/// Locate and parse the configuration file.
///
/// The path comes from `--config`, then `$DIARIO_CONFIG`, then the user config
/// directory, e.g. `$XDG_CONFIG_HOME/diario/config.toml`.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<(CoreConfig, ApiConfig), Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(DIARIO_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        if let Some(true) = is_dev_mode() {
            return Err(format!(
                "Development environment detected ({DIARIO_DEV_ENV} is set): config must be explicitly specified via --config or {DIARIO_CONFIG_ENV} environment variable",
            ).into());
        }
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            return Err(format!("No config found at: {}", config.display()).into());
        }
        config
    };

    let raw = fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()?;

    tracing::debug!(path = %path.display(), base_url = %raw.api.base_url, "config loaded");
    Ok((raw.core, raw.api))
}

#[derive(Debug, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: CoreConfig,

    api: ApiConfig,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(not(unix))]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific home directory not found".into())
}

fn is_dev_mode() -> Option<bool> {
    let val = std::env::var(DIARIO_DEV_ENV).ok()?;
    let lower = val.to_lowercase();
    if DIARIO_DEV_VALID_TRUE.contains(&lower.as_str()) {
        Some(true)
    } else if DIARIO_DEV_VALID_FALSE.contains(&lower.as_str()) {
        Some(false)
    } else {
        tracing::warn!(
            "Unrecognized value for {}: '{}'. Expected one of: true: {}, false: {}. Treating as unset.",
            DIARIO_DEV_ENV,
            val,
            DIARIO_DEV_VALID_TRUE.join(", "),
            DIARIO_DEV_VALID_FALSE.join(", ")
        );
        None
    }
}
