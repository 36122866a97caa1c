//! Errors raised while talking to the game API.

use thiserror::Error;

/// Failure of a single API call.
#[derive(Error, Debug)]
pub enum Error {
    /// The server answered with a non-success status.
    #[error("HTTP response error {status} from {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// Status code returned by the server.
        status: u16,
    },
    /// The request never produced a response.
    #[error("request to {url} failed: {source}")]
    Network {
        /// Requested URL.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },
    /// The body was not valid JSON of the expected shape.
    #[error("failed to parse response from {url}: {source}")]
    Parse {
        /// Requested URL.
        url: String,
        /// Underlying decoder error.
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// True for non-success statuses and network failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Status { .. } | Error::Network { .. })
    }

    /// True when the body could not be decoded.
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }

    /// HTTP status code, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Network { source, .. } => source.status().map(|status| status.as_u16()),
            Error::Parse { .. } => None,
        }
    }

    /// URL of the failed request.
    pub fn url(&self) -> &str {
        match self {
            Error::Status { url, .. } | Error::Network { url, .. } | Error::Parse { url, .. } => {
                url
            }
        }
    }
}

/// Result alias for API operations.
pub type Result<T> = std::result::Result<T, Error>;
