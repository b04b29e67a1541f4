//! Transport collaborators.
//!
//! The resolver talks to the outside world through two narrow traits:
//! [`ProtocolLookup`] (a finger-style line protocol) and [`DirectoryQuery`]
//! (a directory search returning a raw response body). Both return an
//! explicit [`TransportError`] on failure; the resolution pipeline treats
//! every error as "no data" for that step.
//!
//! | Implementation | Trait | Module |
//! |----------------|-------|--------|
//! | [`FingerClient`](crate::finger::FingerClient) | [`ProtocolLookup`] | [`crate::finger`] |
//! | [`FingerDirectory`](crate::finger::FingerDirectory) | [`DirectoryQuery`] | [`crate::finger`] |
//! | [`WebDirectory`](crate::webdir::WebDirectory) | [`DirectoryQuery`] | [`crate::webdir`] |

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Why a transport round trip produced no response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("could not resolve host {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("could not connect to {host}: {source}")]
    Connect {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// A line-oriented request/response lookup against a named host.
pub trait ProtocolLookup {
    /// Sends `query` to `host` and returns the complete response text.
    fn lookup(&self, query: &str, host: &str) -> Result<String, TransportError>;
}

/// A directory search by name, username or alias.
pub trait DirectoryQuery {
    /// Runs `query` against the directory and returns the raw response body.
    fn query(&self, query: &str) -> Result<String, TransportError>;
}
