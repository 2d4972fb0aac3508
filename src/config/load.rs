use super::paths::{default_client_config_path, default_state_root_path};
use super::{ConfigError, ShellSettings};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const ENDPOINT_ENV: &str = "DIGDAG_SHELL_ENDPOINT";
pub const ENDPOINT_CONFIG_KEY: &str = "client.http.endpoint";
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:65432";

/// Parses the digdag client config: `key = value` per line, `#` comments.
/// Only the first `=` splits, so values may contain `=`.
pub fn parse_client_config(
    path: &str,
    raw: &str,
) -> Result<BTreeMap<String, String>, ConfigError> {
    let mut values = BTreeMap::new();
    for (idx, line) in raw.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = trimmed.split_once('=') else {
            return Err(ConfigError::Parse {
                path: path.to_string(),
                line: idx + 1,
            });
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::Parse {
                path: path.to_string(),
                line: idx + 1,
            });
        }
        values.insert(key.to_string(), value.trim().to_string());
    }
    Ok(values)
}

pub fn load_client_config(path: &Path) -> Result<BTreeMap<String, String>, ConfigError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_client_config(&path.display().to_string(), &raw)
}

/// Precedence: explicit flag, then environment, then the client config file,
/// then the local default.
pub fn resolve_endpoint(
    flag: Option<&str>,
    env: Option<&str>,
    file_values: &BTreeMap<String, String>,
) -> Result<String, ConfigError> {
    let endpoint = flag
        .filter(|v| !v.trim().is_empty())
        .or_else(|| env.filter(|v| !v.trim().is_empty()))
        .or_else(|| {
            file_values
                .get(ENDPOINT_CONFIG_KEY)
                .map(String::as_str)
                .filter(|v| !v.is_empty())
        })
        .unwrap_or(DEFAULT_ENDPOINT)
        .trim();
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(ConfigError::InvalidEndpoint(endpoint.to_string()));
    }
    Ok(endpoint.trim_end_matches('/').to_string())
}

/// Without a home directory there is no client config to read; the flag and
/// environment still apply.
pub fn load_shell_settings(endpoint_flag: Option<&str>) -> Result<ShellSettings, ConfigError> {
    let file_values = match default_client_config_path() {
        Ok(path) => load_client_config(&path)?,
        Err(ConfigError::HomeDirectoryUnavailable(_)) => BTreeMap::new(),
        Err(err) => return Err(err),
    };
    let env = std::env::var(ENDPOINT_ENV).ok();
    let endpoint = resolve_endpoint(endpoint_flag, env.as_deref(), &file_values)?;
    Ok(ShellSettings {
        endpoint,
        state_root: default_state_root_path().ok(),
    })
}
