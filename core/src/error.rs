use std::fmt;
use thiserror::Error;

/// The error type for vzaar client operations
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Credentials are missing or malformed where signing is required
    CredentialInvalid,

    /// Request cannot be built or signed (missing required fields, etc.)
    RequestInvalid,

    /// Response payload is not well-formed JSON/XML
    ParseInvalid,

    /// Payload is well-formed but missing the expected fields
    ResponseMalformed,

    /// The API embedded a structured error in an otherwise OK response
    Remote,

    /// Network/IO failure reported by the transport capability
    Transport,

    /// Storage service response missing the expected key path shape
    UploadResponseInvalid,

    /// Unexpected errors
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

// Convenience constructors
impl Error {
    /// Create a credential invalid error
    pub fn credential_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialInvalid, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create a parse invalid error
    pub fn parse_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParseInvalid, message)
    }

    /// Create a response malformed error
    pub fn response_malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ResponseMalformed, message)
    }

    /// Create a remote error
    pub fn remote(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Remote, message)
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create an upload response invalid error
    pub fn upload_response_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UploadResponseInvalid, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::CredentialInvalid => write!(f, "invalid credentials"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::ParseInvalid => write!(f, "malformed payload"),
            ErrorKind::ResponseMalformed => write!(f, "unexpected response shape"),
            ErrorKind::Remote => write!(f, "remote api error"),
            ErrorKind::Transport => write!(f, "transport failure"),
            ErrorKind::UploadResponseInvalid => write!(f, "invalid upload response"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

