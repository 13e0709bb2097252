use std::io;
use std::path::Path;

use crate::domain::config::{AppConfig, ServerRuntimeConfig};
use crate::error::TimesheetError;

pub const APP_NAME: &str = "tsboard";
const SERVER_RUNTIME: &str = "server-runtime";

pub fn load_config() -> AppConfig {
    let mut config = match confy::load::<AppConfig>(APP_NAME, "config") {
        Ok(cfg) => {
            tracing::info!("config loaded");
            cfg
        }
        Err(error) => {
            tracing::warn!(%error, "cannot load config, using default");
            AppConfig::default()
        }
    };

    if let Some(path) = std::env::var("TIMESHEET_DATA_FILE")
        .ok()
        .map(|value| value.replace('"', "").trim().to_string())
        .filter(|value| !value.is_empty())
    {
        config.data_file = path;
    }
    config
}

/// Never fails: any load error yields the fixed environment-derived default.
/// Nothing is written when the runtime file is missing.
pub fn server_config() -> ServerRuntimeConfig {
    server_config_with(|| -> Result<ServerRuntimeConfig, TimesheetError> {
        let path = confy::get_configuration_file_path(APP_NAME, SERVER_RUNTIME)?;
        load_existing(&path)
    })
}

fn load_existing(path: &Path) -> Result<ServerRuntimeConfig, TimesheetError> {
    if !path.is_file() {
        return Err(TimesheetError::Io {
            path: path.display().to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no runtime config"),
        });
    }
    Ok(confy::load_path(path)?)
}

fn server_config_with<E: std::fmt::Display>(
    load: impl FnOnce() -> Result<ServerRuntimeConfig, E>,
) -> ServerRuntimeConfig {
    match load() {
        Ok(cfg) => cfg,
        Err(error) => {
            tracing::debug!(%error, "skip get server runtime config");
            ServerRuntimeConfig::fallback()
        }
    }
}
