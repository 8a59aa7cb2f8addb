//! Client error types.

use thiserror::Error;

/// Errors that can occur when calling the evaluation service.
///
/// The wizard does not distinguish between them: every variant ends the
/// submission as "evaluation unavailable".
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-2xx status.
    #[error("evaluation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not a well-formed verdict.
    #[error("malformed evaluation response: {0}")]
    MalformedResponse(String),
}
