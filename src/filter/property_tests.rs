use proptest::prelude::*;
use serde_json::json;
use crate::filter::coerce::leading_number;
use crate::filter::engine::ListingFilter;
use crate::filter::query::token_groups;
use crate::filter::store::FilterState;
use crate::listing::Listing;

fn listings_with_bedrooms(counts: &[u8]) -> Vec<Listing> {
    counts
        .iter()
        .enumerate()
        .map(|(i, count)| {
            Listing::from_value(json!({
                "details": {"listing-id": i + 1, "num-bedrooms": count}
            }))
            .unwrap()
        })
        .collect()
}

fn ids(listings: &[&Listing]) -> Vec<String> {
    listings.iter().map(|l| l.listing_id()).collect()
}

// Property test: without criteria the search window is a contiguous slice
proptest! {
    #[test]
    fn unfiltered_search_window(
        counts in proptest::collection::vec(0u8..8, 0..30),
        offset in -3i64..35,
        limit in -2i64..35,
    ) {
        let n = counts.len();
        let mut filter = ListingFilter::new(listings_with_bedrooms(&counts));
        let found = ids(&filter.search(offset, limit).get_listings());

        let start = usize::try_from(offset.max(1) - 1).unwrap();
        let take = if limit > 0 { limit as usize } else { usize::MAX };
        let expected: Vec<String> = (start..n).take(take).map(|i| (i + 1).to_string()).collect();

        prop_assert_eq!(found, expected);
        prop_assert_eq!(filter.state(), FilterState::Filtered);
    }
}

// Property test: a bedroom bound keeps exactly the listings that satisfy it, in order
proptest! {
    #[test]
    fn bedroom_bound_keeps_satisfying_listings(
        counts in proptest::collection::vec(0u8..8, 0..30),
        min in 1i64..8,
    ) {
        let mut filter = ListingFilter::new(listings_with_bedrooms(&counts));
        filter.min_bedroom_count(min).unwrap();
        let found = ids(&filter.search(0, 0).get_listings());

        let expected: Vec<String> = counts
            .iter()
            .enumerate()
            .filter(|(_, count)| i64::from(**count) >= min)
            .map(|(i, _)| (i + 1).to_string())
            .collect();

        prop_assert_eq!(found, expected);
    }
}

// Property test: reset always brings back the full collection
proptest! {
    #[test]
    fn reset_restores_everything(
        counts in proptest::collection::vec(0u8..8, 0..20),
        max in 1i64..8,
    ) {
        let mut filter = ListingFilter::new(listings_with_bedrooms(&counts));
        filter.max_bedroom_count(max).unwrap().search(0, 0);
        filter.reset();

        prop_assert!(filter.criteria().is_empty());
        prop_assert_eq!(filter.get_listings().len(), counts.len());
    }
}

// Property test: paging never returns more than asked for
proptest! {
    #[test]
    fn get_listings_from_is_bounded(
        counts in proptest::collection::vec(0u8..8, 0..20),
        offset in 0i64..25,
        limit in 1i64..25,
    ) {
        let filter = ListingFilter::new(listings_with_bedrooms(&counts));
        let page = filter.get_listings_from(offset, limit);
        let start = usize::try_from(offset.max(1) - 1).unwrap();

        prop_assert!(page.len() <= limit as usize);
        prop_assert_eq!(page.len(), counts.len().saturating_sub(start).min(limit as usize));
    }
}

// Property test: amenity tokens are lower-cased and at least three characters long
proptest! {
    #[test]
    fn token_groups_drop_short_tokens(phrases in proptest::collection::vec("[A-Za-z/ ]{0,24}", 0..6)) {
        let groups = token_groups(&phrases);

        prop_assert!(groups.len() <= phrases.len());
        for group in &groups {
            prop_assert!(!group.is_empty());
            for token in group {
                prop_assert!(token.chars().count() >= 3);
                prop_assert_eq!(token, &token.to_lowercase());
            }
        }
    }
}

// Property test: numeric prefixes read back as the number
proptest! {
    #[test]
    fn leading_number_reads_integer_prefix(n in 0u32..1_000_000, suffix in "[ a-z]{0,8}") {
        let text = format!("{}{}", n, suffix);
        prop_assert_eq!(leading_number(&text), f64::from(n));
    }
}
