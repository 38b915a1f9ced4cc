//! Cache Module Tests
//!
//! Validates the command canonicalization rules and the LRU response store.
//!
//! ## Test Scopes
//! - **Canonical keys**: Equivalent command phrasings must collapse to one key.
//! - **LRU laws**: Bounded size, eviction order, recency updates on read.
//! - **Sharing**: The store must hold up under concurrent sessions.

#[cfg(test)]
mod tests {
    use crate::cache::key::canonical_cache_key;
    use crate::cache::lru::ResponseCache;
    use std::sync::Arc;

    // ============================================================
    // CANONICAL KEY TESTS
    // ============================================================

    #[test]
    fn test_key_empty_input() {
        assert_eq!(canonical_cache_key(""), "");
        assert_eq!(canonical_cache_key("   \t  "), "");
    }

    #[test]
    fn test_key_list_is_constant() {
        assert_eq!(canonical_cache_key("LIST"), "LIST");
        assert_eq!(canonical_cache_key("list"), "LIST");
        assert_eq!(canonical_cache_key("  List  "), "LIST");
    }

    #[test]
    fn test_key_list_ignores_trailing_tokens() {
        assert_eq!(canonical_cache_key("LIST extra tokens"), "LIST");
    }

    #[test]
    fn test_key_quit_is_constant() {
        assert_eq!(canonical_cache_key("quit"), "QUIT");
    }

    #[test]
    fn test_key_search_field_order_irrelevant() {
        let a = canonical_cache_key("SEARCH city=LongBeach max_price=3000");
        let b = canonical_cache_key("SEARCH max_price=3000 city=LongBeach");
        assert_eq!(a, b);
        assert_eq!(a, "SEARCH city=LongBeach max_price=3000");
    }

    #[test]
    fn test_key_search_field_keys_case_insensitive() {
        let a = canonical_cache_key("SEARCH CITY=LongBeach MAX_PRICE=3000");
        let b = canonical_cache_key("search city=LongBeach max_price=3000");
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_search_extra_whitespace_irrelevant() {
        let a = canonical_cache_key("  SEARCH   city=LongBeach    max_price=3000 ");
        assert_eq!(a, "SEARCH city=LongBeach max_price=3000");
    }

    #[test]
    fn test_key_search_unrecognized_fields_ignored() {
        let a = canonical_cache_key("SEARCH city=LongBeach max_price=3000 sort=asc");
        assert_eq!(a, "SEARCH city=LongBeach max_price=3000");
    }

    #[test]
    fn test_key_search_missing_fields_kept_empty() {
        assert_eq!(
            canonical_cache_key("SEARCH city=LongBeach"),
            "SEARCH city=LongBeach max_price="
        );
        assert_eq!(canonical_cache_key("SEARCH"), "SEARCH city= max_price=");
    }

    #[test]
    fn test_key_search_values_taken_verbatim() {
        // Values are not normalized: a different spelling is a different key.
        let a = canonical_cache_key("SEARCH city=longbeach max_price=3000");
        let b = canonical_cache_key("SEARCH city=LongBeach max_price=3000");
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_other_verbs_joined() {
        assert_eq!(canonical_cache_key("foo bar baz"), "FOO bar baz");
        assert_eq!(canonical_cache_key("foo"), "FOO");
    }

    // ============================================================
    // LRU TESTS
    // ============================================================

    fn filled(capacity: usize, keys: &[&str]) -> ResponseCache {
        let cache = ResponseCache::new(capacity);
        for key in keys {
            cache.put(key.to_string(), format!("value-{}", key));
        }
        cache
    }

    #[test]
    fn test_lru_get_miss_has_no_side_effects() {
        let cache = ResponseCache::new(2);
        assert_eq!(cache.get("absent"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_lru_put_then_get() {
        let cache = ResponseCache::new(2);
        cache.put("k".to_string(), "v".to_string());
        assert_eq!(cache.get("k"), Some("v".to_string()));
    }

    #[test]
    fn test_lru_size_never_exceeds_bound() {
        let cache = ResponseCache::new(3);
        for i in 0..10 {
            cache.put(format!("k{}", i), format!("v{}", i));
        }
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_lru_evicts_oldest_first() {
        let cache = filled(3, &["k1", "k2", "k3", "k4"]);

        assert_eq!(cache.peek("k1"), None, "oldest entry should be evicted");
        assert!(cache.peek("k2").is_some());
        assert!(cache.peek("k3").is_some());
        assert!(cache.peek("k4").is_some());
    }

    #[test]
    fn test_lru_get_refreshes_recency() {
        let cache = filled(3, &["k1", "k2", "k3"]);

        // Touch k1, then push one more entry: k2 is now the oldest.
        assert!(cache.get("k1").is_some());
        cache.put("k4".to_string(), "v".to_string());

        assert!(cache.peek("k1").is_some(), "touched entry must survive");
        assert_eq!(cache.peek("k2"), None, "untouched oldest must go");
    }

    #[test]
    fn test_lru_put_overwrites_and_refreshes() {
        let cache = filled(3, &["k1", "k2", "k3"]);

        cache.put("k1".to_string(), "new".to_string());
        cache.put("k4".to_string(), "v".to_string());

        assert_eq!(cache.get("k1"), Some("new".to_string()));
        assert_eq!(cache.peek("k2"), None);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_lru_peek_does_not_refresh() {
        let cache = filled(2, &["k1", "k2"]);

        cache.peek("k1");
        cache.put("k3".to_string(), "v".to_string());

        assert_eq!(cache.peek("k1"), None, "peek must not protect from eviction");
        assert!(cache.peek("k2").is_some());
    }

    #[test]
    fn test_lru_zero_capacity_clamped_to_one() {
        let cache = ResponseCache::new(0);
        cache.put("k".to_string(), "v".to_string());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_lru_concurrent_access() {
        let cache = Arc::new(ResponseCache::new(16));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for i in 0..200 {
                        let key = format!("t{}-k{}", t, i % 10);
                        cache.put(key.clone(), format!("v{}", i));
                        let _ = cache.get(&key);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.len() <= 16);
        assert!(!cache.is_empty());
    }
}
