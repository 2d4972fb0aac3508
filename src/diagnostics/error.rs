#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagnosticsError {
    #[error("invalid resume intent: {0}")]
    InvalidResumeIntent(String),
    #[error("failed to decompress log file `{file_name}`: {reason}")]
    LogDecompression { file_name: String, reason: String },
    #[error("failed to fetch log file `{file_name}`: {reason}")]
    LogFetch { file_name: String, reason: String },
}
