//! Unified error type.

use std::net::AddrParseError;

use thiserror::Error;

/// The error type returned by the server's fallible operations.
///
/// Application-level outcomes (404, 503 from a failing probe, etc.) are
/// expressed as HTTP [`Response`](crate::Response) values, not as `Error`s.
/// This type surfaces infrastructure failures: parsing the bind address,
/// binding to a port, or accepting a connection.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid socket address `{addr}`: {source}")]
    Address {
        addr: String,
        #[source]
        source: AddrParseError,
    },
}
