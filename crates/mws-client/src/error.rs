//! Error types for mws-client.

/// Result type alias for mws-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Message used when no response could be obtained at all.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Error type for mws-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Shorthand for a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config(message.into()))
    }

    /// Shorthand for a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation(message.into()))
    }

    /// The remote error code, or an empty string for local failures.
    pub fn code(&self) -> &str {
        match &self.kind {
            ErrorKind::Mws { code, .. } => code,
            _ => "",
        }
    }

    /// Human-readable message without the kind prefix.
    pub fn message(&self) -> String {
        match &self.kind {
            ErrorKind::Mws { message, .. } => message.clone(),
            ErrorKind::Config(msg)
            | ErrorKind::Validation(msg)
            | ErrorKind::Transport(msg)
            | ErrorKind::Xml(msg)
            | ErrorKind::Csv(msg)
            | ErrorKind::Encoding(msg)
            | ErrorKind::InvalidResponse(msg) => msg.clone(),
        }
    }

    /// HTTP status of the failed call, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Mws { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the client was misconfigured.
    pub fn is_config(&self) -> bool {
        matches!(self.kind, ErrorKind::Config(_))
    }

    /// Returns true if the input was rejected before any I/O.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind, ErrorKind::Validation(_))
    }

    /// Returns true if MWS answered with an error.
    pub fn is_remote(&self) -> bool {
        matches!(self.kind, ErrorKind::Mws { .. })
    }

    /// Returns true if no response could be obtained.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport(_))
    }

    /// Returns true if a body could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Xml(_) | ErrorKind::Csv(_) | ErrorKind::Encoding(_)
        )
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Missing credential, unknown marketplace or unknown operation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input rejected before the request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error returned by MWS.
    #[error("MWS error: {code} - {message}")]
    Mws {
        status: u16,
        code: String,
        message: String,
    },

    /// The request could not be completed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// XML could not be parsed or written.
    #[error("XML error: {0}")]
    Xml(String),

    /// CSV could not be parsed or written.
    #[error("CSV error: {0}")]
    Csv(String),

    /// Text could not be converted to or from the target charset.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The response parsed but lacked an expected element.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "Request timed out".to_string()
        } else if err.is_connect() {
            format!("{GENERIC_ERROR_MESSAGE}: connection failed")
        } else {
            GENERIC_ERROR_MESSAGE.to_string()
        };
        Error::with_source(ErrorKind::Transport(message), err)
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::with_source(ErrorKind::Xml(err.to_string()), err)
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::with_source(ErrorKind::Xml(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("invalid URL: {err}")), err)
    }
}
