//! Error types for glids

use thiserror::Error;

/// Result type alias for glids operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The user declined a large-fetch confirmation.
    ///
    /// Never wrapped: every layer passes this variant through untouched so the
    /// entry point can turn it into a clean exit.
    #[error("operation cancelled by user")]
    Cancelled,

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Operation failed: {0}")]
    Other(String),
}

impl Error {
    /// True if this error is a user cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// HTTP status of the underlying API error, looking through context.
    pub fn api_status(&self) -> Option<u16> {
        match self {
            Error::Api(api) => api.status(),
            Error::Context { source, .. } => source.api_status(),
            _ => None,
        }
    }

    /// Attach context to an error. Cancellation is returned unchanged.
    pub fn context(self, context: impl Into<String>) -> Self {
        match self {
            Error::Cancelled => Error::Cancelled,
            other => Error::Context {
                context: context.into(),
                source: Box::new(other),
            },
        }
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("error making API request: {0}")]
    Request(String),

    #[error("API request failed with status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("error parsing JSON response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Request("request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Request(format!("failed to connect to GitLab: {}", err))
        } else {
            ApiError::Request(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GITLAB_TOKEN environment variable must be set.")]
    MissingToken,

    #[error(
        "GitLab host must be provided via --host flag or GITLAB_HOST environment variable."
    )]
    MissingHost,

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
