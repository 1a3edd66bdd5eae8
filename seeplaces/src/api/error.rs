//! SeePlaces client error types.

/// Errors from the SeePlaces HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum SeePlacesError {
    /// The underlying HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// A header value is not valid in an HTTP header
    #[error("invalid value for header {name}")]
    InvalidHeader { name: String },

    /// The endpoint path cannot be joined onto the base URL
    #[error("invalid endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    /// The request never produced a response (DNS, connect, timeout, ...)
    #[error("request to endpoint {endpoint} failed")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-2xx status
    #[error("cannot connect to endpoint: {endpoint} (HTTP {status})")]
    ApiConnection {
        endpoint: String,
        status: u16,
        #[source]
        source: reqwest::Error,
    },

    /// The response body does not match the expected schema
    #[error("JSON parse error from {endpoint}: {message}")]
    Json {
        endpoint: String,
        message: String,
        body: Option<String>,
    },
}

impl SeePlacesError {
    /// The endpoint the failing request targeted, if any.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            SeePlacesError::InvalidEndpoint { endpoint, .. }
            | SeePlacesError::Transport { endpoint, .. }
            | SeePlacesError::ApiConnection { endpoint, .. }
            | SeePlacesError::Json { endpoint, .. } => Some(endpoint),
            SeePlacesError::Client(_) | SeePlacesError::InvalidHeader { .. } => None,
        }
    }
}
