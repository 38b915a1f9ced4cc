//! Response Caching Module
//!
//! Avoids redundant data-server round-trips by storing fully serialized
//! replies, keyed by the semantic content of the command that produced them.
//!
//! ## Core Concepts
//! - **Canonical keys**: two commands that mean the same thing (same verb,
//!   same fields, any token order or verb casing) map to one key, so the
//!   cache cannot fragment across equivalent phrasings.
//! - **Bounded LRU**: the store never holds more than its configured maximum;
//!   inserting past the bound evicts exactly the least-recently-touched
//!   entry. Recency is bumped on reads as well as writes.
//! - **Single synchronization point**: one mutex guards the whole structure.
//!   Sessions are independent tasks; the cache is the only state they share.
//! - **No invalidation**: entries leave only by eviction or shutdown, so a
//!   backend data change may not show up until the entry ages out. This
//!   staleness window is accepted.
//!
//! ## Submodules
//! - **`key`**: Command-line canonicalization.
//! - **`lru`**: The shared, mutex-protected response store.

pub mod key;
pub mod lru;

#[cfg(test)]
mod tests;
