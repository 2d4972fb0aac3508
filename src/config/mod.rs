pub mod error;
pub mod load;
pub mod paths;

pub use error::ConfigError;
pub use load::{
    load_client_config, load_shell_settings, parse_client_config, resolve_endpoint,
    DEFAULT_ENDPOINT, ENDPOINT_CONFIG_KEY, ENDPOINT_ENV,
};
pub use paths::{default_client_config_path, default_state_root_path, GLOBAL_STATE_DIR};

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellSettings {
    pub endpoint: String,
    /// Where the event log lives; `None` disables logging.
    pub state_root: Option<PathBuf>,
}

impl ShellSettings {
    pub fn api_base(&self) -> String {
        format!("{}/api", self.endpoint.trim_end_matches('/'))
    }
}
