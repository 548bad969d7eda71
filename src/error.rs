/*!
# Error Module

Crate-level error type. Election rule violations are carried as
`ElectionError` so callers can match on the exact rule; the remaining
variants cover the ambient surface (configuration, serialization, codec and
address parsing).

```rust
use voting_engine::{Error, election::ElectionError};

# fn main() {
let err: Error = ElectionError::VotingNotActive.into();
assert_eq!(err.election().map(|e| e.kind()), Some("VotingNotActive"));
# }
```
*/

use thiserror::Error;

use crate::election::ElectionError;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Election rule violation
    #[error("Election error: {0}")]
    Election(#[from] ElectionError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// SCALE decoding error
    #[error("Codec error: {0}")]
    Codec(#[from] parity_scale_codec::Error),

    /// Malformed hex address
    #[error("Invalid address: {0}")]
    Address(#[from] hex::FromHexError),
}

impl Error {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Election(e) => e.is_retryable(),
            Error::Config(_) => false,
            Error::Serialization(_) => false,
            Error::Codec(_) => false,
            Error::Address(_) => false,
        }
    }

    /// The election rule violation, if this is one
    pub fn election(&self) -> Option<&ElectionError> {
        match self {
            Error::Election(e) => Some(e),
            _ => None,
        }
    }
}
