//! Ranking Module Tests
//!
//! Validates the ordering law: price ascending, ties broken by bedrooms
//! descending, full ties stable.

#[cfg(test)]
mod tests {
    use crate::data::types::Listing;
    use crate::rank::rank_listings;

    fn listing(id: u64, price: u64, bedrooms: u64) -> Listing {
        Listing {
            id,
            city: "LongBeach".to_string(),
            address: format!("{} Main St", id),
            price,
            bedrooms,
        }
    }

    #[test]
    fn test_rank_price_ascending() {
        let ranked = rank_listings(vec![
            listing(1, 3000, 2),
            listing(2, 1000, 2),
            listing(3, 2000, 2),
        ]);
        let prices: Vec<u64> = ranked.iter().map(|l| l.price).collect();
        assert_eq!(prices, vec![1000, 2000, 3000]);
    }

    #[test]
    fn test_rank_ties_by_bedrooms_descending() {
        let ranked = rank_listings(vec![
            listing(1, 2000, 1),
            listing(2, 2000, 3),
            listing(3, 2000, 2),
        ]);
        let ids: Vec<u64> = ranked.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_rank_full_ties_keep_arrival_order() {
        let ranked = rank_listings(vec![
            listing(7, 2000, 2),
            listing(3, 2000, 2),
            listing(5, 2000, 2),
        ]);
        let ids: Vec<u64> = ranked.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![7, 3, 5], "stable sort must preserve input order");
    }

    #[test]
    fn test_rank_is_deterministic() {
        let input = vec![
            listing(1, 2400, 2),
            listing(2, 1950, 1),
            listing(3, 2400, 3),
            listing(4, 3200, 3),
        ];
        let first = rank_listings(input.clone());
        let second = rank_listings(input);
        assert_eq!(first, second);

        // Re-ranking an already ranked sequence changes nothing.
        assert_eq!(rank_listings(first.clone()), first);
    }

    #[test]
    fn test_rank_empty_input() {
        assert!(rank_listings(Vec::new()).is_empty());
    }
}
