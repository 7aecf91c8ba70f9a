//! Error types for mws-feeds.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// The underlying client error, if this error came from the pipeline.
    pub fn mws_error(&self) -> Option<&mws_client::Error> {
        self.source.as_ref()?.downcast_ref::<mws_client::Error>()
    }

    /// Remote error code, empty for local failures.
    pub fn code(&self) -> &str {
        self.mws_error().map(mws_client::Error::code).unwrap_or_default()
    }

    /// Returns true if the input was rejected before any I/O.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind, ErrorKind::Validation(_))
            || self.mws_error().is_some_and(mws_client::Error::is_validation)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("Client error: {0}")]
    Client(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("CSV error: {0}")]
    Csv(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<mws_client::Error> for Error {
    fn from(err: mws_client::Error) -> Self {
        Error {
            kind: ErrorKind::Client(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error {
            kind: ErrorKind::Csv(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}
