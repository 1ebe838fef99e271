#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("invalid link syntax: empty page name in '{0}'")]
    InvalidLinkSyntax(String),
    #[error("path resolution failed: {0}")]
    PathResolution(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid completion payload: {0}")]
    InvalidPayload(String),
    #[error("line {line} out of range ({line_count} lines)")]
    LineOutOfRange { line: usize, line_count: usize },
    #[error("write failed for {location}: {source}")]
    WriteFailure {
        location: String,
        source: std::io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type VaultResult<T> = Result<T, VaultError>;
