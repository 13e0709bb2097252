use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimesheetError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid timesheet data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(#[from] confy::ConfyError),
    #[error("invalid date range: {0}")]
    InvalidRange(String),
    #[error("{0}")]
    Usage(String),
}
