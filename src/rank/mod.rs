//! Result Ranking Module
//!
//! Orders listing records before they are serialized back to the client.
//! Pure and deterministic: no I/O, same input always yields the same output.

use std::cmp::Reverse;

use crate::data::types::Listing;

/// Sorts listings by ascending price; equal prices are broken by descending
/// bedroom count. The sort is stable, so fully tied records keep their
/// arrival order from the data server.
pub fn rank_listings(mut listings: Vec<Listing>) -> Vec<Listing> {
    listings.sort_by_key(|listing| (listing.price, Reverse(listing.bedrooms)));
    listings
}

#[cfg(test)]
mod tests;
