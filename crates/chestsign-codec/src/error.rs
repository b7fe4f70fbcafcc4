//! Error types for the sign codec.
//!
//! Recognition misses (unknown header, missing sign, unreadable saved
//! record) are not errors: they surface as `None` or as a skipped entry.
//! Everything here is a failure reported by a collaborator or by the
//! configuration layer, and is handed to the caller unchanged.

use chestsign_types::SignLocation;
use thiserror::Error;

/// Errors raised while reading or writing protection signs.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The text surface rejected a read, write or commit.
    #[error("surface error at {location}: {message}")]
    Surface {
        location: SignLocation,
        message: String,
    },

    /// The hidden metadata store failed.
    #[error("hidden data store error: {0}")]
    HiddenStore(String),

    /// Looking up a sign by location failed.
    #[error("surface resolution failed: {0}")]
    Resolve(String),

    /// Header settings could not be loaded or are inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal lock poisoned.
    #[error("lock poisoned")]
    LockPoisoned,
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
