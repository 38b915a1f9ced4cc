use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single housing listing as served by the data store.
///
/// Listings are immutable once parsed: the gateway only reorders and
/// re-serializes collections of them, it never edits a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: u64,
    pub city: String,
    pub address: String,
    pub price: u64,
    pub bedrooms: u64,
}

/// Failures on the data-store side of the gateway.
///
/// The `Display` text of each variant is exactly what the client sees in the
/// `ERROR` reply, so the messages are part of the wire contract.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataError {
    /// Connect failure, read failure or an empty reply.
    #[error("no response from data server")]
    NoResponse,

    /// The data server answered with an explicit error line; the text after
    /// the marker is passed through to the client.
    #[error("{0}")]
    Backend(String),

    /// The first reply line is neither a success nor an error marker.
    #[error("unexpected response from data server")]
    UnexpectedResponse,

    /// The success line declared a non-zero record count but no record could
    /// be extracted from the body.
    #[error("could not parse listings from data server response")]
    UnparsableListings,
}
