//! Error types for the interaction layer.
//!
//! Only store-level failures are errors. Missing edge types, missing edges and
//! zero counts are ordinary results (`None`, `false`, `0`).

use std::fmt;
use thiserror::Error;

/// Store error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The store could not be reached or failed mid-operation
    Connection,
    /// Attribute payload could not be encoded/decoded
    Serialization,
    /// Internal lock was poisoned by a panicking writer
    Poisoned,
    /// Snapshot file I/O
    IO,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Connection => "connection",
            ErrorKind::Serialization => "serialization",
            ErrorKind::Poisoned => "poisoned",
            ErrorKind::IO => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Graph store error
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct StoreError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl StoreError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Connection, message)
    }

    pub fn poisoned(what: &str) -> Self {
        Self::new(ErrorKind::Poisoned, format!("{what} lock poisoned"))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::new(ErrorKind::Serialization, format!("JSON error: {}", err)).with_source(err)
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::new(ErrorKind::IO, format!("I/O error: {}", err)).with_source(err)
    }
}

/// Errors crossing the interaction layer boundary
#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("graph store failure: {0}")]
    Store(#[from] StoreError),

    #[error("entity collection failure for kind '{kind}': {source}")]
    Collection {
        kind: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, InteractionError>;
