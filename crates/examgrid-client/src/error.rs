//! Scheduler client error types.

use thiserror::Error;

/// Errors that can occur when talking to the remote scheduler.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The upload was not a spreadsheet or JSON file.
    #[error("invalid file format: {0} (expected .xlsx, .xls or .json)")]
    InvalidFileFormat(String),

    /// The server answered with an error status.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The server answered 2xx with a body we could not decode.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Returns `true` if repeating the same request cannot succeed.
    pub fn is_permanent(&self) -> bool {
        match self {
            ClientError::InvalidFileFormat(_) => true,
            ClientError::ApiError { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permanence() {
        assert!(ClientError::InvalidFileFormat("a.csv".into()).is_permanent());
        assert!(ClientError::ApiError {
            status: 400,
            message: "No student data uploaded".into()
        }
        .is_permanent());
        assert!(!ClientError::ApiError {
            status: 500,
            message: "boom".into()
        }
        .is_permanent());
        assert!(!ClientError::Timeout(30).is_permanent());
        assert!(!ClientError::NetworkError("refused".into()).is_permanent());
    }

    #[test]
    fn messages() {
        let err = ClientError::ApiError {
            status: 400,
            message: "Invalid file format".into(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 400): Invalid file format");
    }
}
