#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config line {line} in {path}: expected `key = value`")]
    Parse { path: String, line: usize },
    #[error("invalid endpoint `{0}`: must start with http:// or https://")]
    InvalidEndpoint(String),
    #[error("failed to resolve home directory for {0}")]
    HomeDirectoryUnavailable(&'static str),
}
