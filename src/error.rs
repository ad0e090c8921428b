use thiserror::Error;

pub type GridcraftResult<T> = Result<T, GridcraftError>;

#[derive(Debug, Error)]
pub enum GridcraftError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Data(#[from] DataError),
}

/// Request validation failures. Client-facing, reported before any
/// computation starts and never retried.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Adaptor {0} not supported")]
    UnsupportedAdapter(String),

    #[error("Data type {0} not supported")]
    UnsupportedRecordType(String),

    #[error("Category {0} not supported")]
    UnsupportedCategory(String),
}

/// Failures raised by the record fetcher. One protocol's fetch failure
/// aborts the whole dataset build (a partial CSV silently understates data).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Upstream fetch failed: {0}")]
    Upstream(String),

    #[error("Fetch IO failure")]
    Io(#[from] std::io::Error),
}

/// Errors related to the shape of fetched data and summary lookups.
///
/// Degenerate-but-valid data (an empty series, a token missing on a given
/// day) is never an error; it surfaces as absence in the output instead.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Summary not found")]
    SummaryNotFound,

    #[error("{resource} not found, please visit /overview/{adapter} to see available protocols")]
    ProtocolNotFound { resource: String, adapter: String },

    #[error("Chart label is not a numeric timestamp: '{0}'")]
    BadChartLabel(String),

    #[error("Failed to parse enum: {0}")]
    ParseEnum(#[from] strum::ParseError),

    #[error("Deserialization failed")]
    Json(#[from] serde_json::Error),
}
