//! Error taxonomy for the console.
//!
//! Four failure classes cover everything the screens can hit. Remote failures
//! are always converted into a user-visible notice at the call site; the
//! controller variants guard the id-uniqueness and membership invariants and
//! do not fire in the normal reconciliation flow.

use thiserror::Error;

/// All errors surfaced by tutordesk.
#[derive(Debug, Error)]
pub enum Error {
    /// A required form field was blank. Raised before any remote call is
    /// made; the collection is never touched.
    #[error("required field is blank: {0}")]
    Validation(String),

    /// A record with this id already exists in the collection.
    #[error("duplicate record id: {0}")]
    DuplicateId(String),

    /// No record with this id exists in the collection.
    #[error("no record with id: {0}")]
    NotFound(String),

    /// The REST backend failed: network error, timeout, or non-2xx status.
    #[error("remote request failed: {0}")]
    Remote(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Remote(err.to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
