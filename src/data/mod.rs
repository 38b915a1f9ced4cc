//! Data Store Access Module
//!
//! Implements the backend-facing half of the gateway: talking to the flat
//! in-memory data store over its raw wire protocol.
//!
//! ## Core Concepts
//! - **One connection per request**: every backend call opens a fresh TCP
//!   connection, sends a single `RAW_LIST`/`RAW_SEARCH` line and reads the
//!   reply. Resource lifetime is bounded by the call itself; there is no pool.
//! - **Bounded reads**: the reply is accumulated until the `END` terminator
//!   is seen or the read goes idle, never blocking indefinitely.
//! - **Tolerant parsing**: listing records arrive as `key=value;` segments,
//!   optionally wrapped in `<`/`>` markers, one per line or concatenated.
//!   Malformed records are skipped instead of aborting the whole reply.
//! - **Error taxonomy**: transport failures and malformed replies both
//!   surface as a [`DataError`], never as a panic across the gateway boundary.
//!
//! ## Submodules
//! - **`client`**: Outbound connection handling and reply accumulation.
//! - **`parser`**: Classification of raw reply text and record extraction.
//! - **`types`**: The `Listing` record and the error taxonomy.

pub mod client;
pub mod parser;
pub mod types;
