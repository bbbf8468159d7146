//! Error types for the Taskboard REST client

use thiserror::Error;

/// Errors that can occur while talking to the task service
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure or an undecodable response body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("HTTP error {status}: {body}")]
    Status { status: u16, body: String },

    /// The configured base URL cannot carry request paths
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Create a non-success status error
    pub fn status<S: Into<String>>(status: u16, body: S) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Create an invalid URL error
    pub fn invalid_url<S: Into<String>>(url: S) -> Self {
        Self::InvalidUrl(url.into())
    }

    /// HTTP status carried by the error, if the server answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            Self::InvalidUrl(_) => None,
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ClientError::status(404, "not found");
        assert_eq!(err.to_string(), "HTTP error 404: not found");
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn test_parse_error_becomes_invalid_url() {
        let err: ClientError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
        assert_eq!(err.status_code(), None);
    }
}
