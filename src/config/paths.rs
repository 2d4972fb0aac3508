use crate::config::ConfigError;
use std::path::PathBuf;

pub const CLIENT_CONFIG_DIR: &str = ".config/digdag";
pub const CLIENT_CONFIG_FILE_NAME: &str = "config";
pub const GLOBAL_STATE_DIR: &str = ".digdag-shell";
pub const STATE_ROOT_ENV: &str = "DIGDAG_SHELL_HOME";

pub fn default_client_config_path() -> Result<PathBuf, ConfigError> {
    let home = std::env::var_os("HOME")
        .ok_or(ConfigError::HomeDirectoryUnavailable("digdag client config"))?;
    Ok(PathBuf::from(home)
        .join(CLIENT_CONFIG_DIR)
        .join(CLIENT_CONFIG_FILE_NAME))
}

pub fn default_state_root_path() -> Result<PathBuf, ConfigError> {
    if let Some(root) = std::env::var_os(STATE_ROOT_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(root));
    }
    let home =
        std::env::var_os("HOME").ok_or(ConfigError::HomeDirectoryUnavailable("shell state root"))?;
    Ok(PathBuf::from(home).join(GLOBAL_STATE_DIR))
}
