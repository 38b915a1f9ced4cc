//! Client Gateway Module
//!
//! The client-facing half of the application server: a line-oriented command
//! protocol and the per-connection session loop that drives it.
//!
//! ## Overview
//! Each accepted connection runs as its own task. The session reads
//! newline-terminated commands, consults the shared response cache, and on a
//! miss bridges the command to the data store: translate, query, parse, rank,
//! serialize, cache. Every inbound line and outbound reply is logged.
//!
//! ## Responsibilities
//! - **Parsing**: Tokenizing command lines into typed requests
//!   (`LIST`/`SEARCH`/`QUIT`), with a structured error for everything else.
//! - **Dispatch**: Cache-first handling; the data server is only contacted on
//!   a miss with a well-formed command.
//! - **Framing**: Serializing replies in the `OK RESULT`/`ERROR` + `END`
//!   wire form.
//! - **Isolation**: A failed or closed session never affects the accept loop
//!   or other sessions.
//!
//! ## Submodules
//! - **`protocol`**: Request parsing and reply serialization.
//! - **`session`**: The accept loop and session state machine.

pub mod protocol;
pub mod session;
