use thiserror::Error;

/// Fatal conditions surfaced to the user. Every variant is recoverable: the
/// session keeps its prior state so the operation can be retried. Malformed
/// holdings rows are not errors at all; they are skipped during parsing and
/// reported through `ParseReport::skipped_rows`.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Bad file type or size, caught before parsing. The user must select
    /// another file.
    #[error("invalid file: {0}")]
    Validation(String),

    /// Missing required column, or an unrecognized value while normalizing
    /// recommendations. Fatal to that operation only.
    #[error("schema error: {0}")]
    Schema(String),

    /// Non-success response (or timeout) from the aggregation or advisory
    /// service, surfaced verbatim.
    #[error("remote service error: {0}")]
    Remote(String),
}
