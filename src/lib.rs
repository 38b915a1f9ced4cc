//! Housing Listing Query Gateway Library
//!
//! This library crate defines the core modules of the middle-tier application
//! gateway. It serves as the foundation for the binary executables: the gateway
//! itself (`main.rs`), the flat in-memory data store (`bin/data_server.rs`) and
//! the interactive front-end (`bin/client.rs`).
//!
//! ## Architecture Modules
//! The system is composed of four loosely coupled subsystems:
//!
//! - **`gateway`**: The client-facing protocol layer. Parses `LIST`/`SEARCH`/`QUIT`
//!   command lines, runs the per-connection session state machine and serializes
//!   `OK`/`ERROR` replies.
//! - **`cache`**: The response caching layer. Canonicalizes command lines into
//!   cache keys and stores serialized replies in a bounded, mutex-protected
//!   LRU structure shared by all sessions.
//! - **`data`**: The backend-facing layer. Opens one connection per outgoing
//!   request to the data store, speaks the raw wire protocol
//!   (`RAW_LIST`/`RAW_SEARCH`) and parses delimiter-wrapped listing records
//!   out of the raw reply text.
//! - **`rank`**: The result ordering stage. A deterministic, pure sort of
//!   listing records by price and bedroom count.

pub mod cache;
pub mod data;
pub mod gateway;
pub mod rank;
