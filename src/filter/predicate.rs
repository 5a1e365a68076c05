//! Listing predicates
//!
//! One predicate per criterion. Each takes a listing and the coerced
//! criterion value and decides pass or fail. Missing listing fields read as
//! empty or zero, so a partial listing fails the relevant check instead of
//! aborting the scan.

use super::fuzzy::TextMatcher;
use super::query::CriterionValue;
use super::registry::Criterion;
use crate::listing::Listing;
use tracing::trace;

/// Neighborhood names differ by a single direction word ("Upper East Side"
/// vs "Upper West Side"), so they need a much stricter match than types
pub const NEIGHBORHOOD_THRESHOLD: f64 = 95.0;
pub const BOROUGH_THRESHOLD: f64 = 90.0;
pub const TYPE_THRESHOLD: f64 = 80.0;

/// Evaluate one criterion against a listing
///
/// A value of the wrong shape for the criterion never passes.
pub fn evaluate<M>(
    criterion: Criterion,
    listing: &Listing,
    value: &CriterionValue,
    matcher: &M,
) -> bool
where
    M: TextMatcher + ?Sized,
{
    use CriterionValue as V;

    match (criterion, value) {
        (Criterion::Neighborhood, V::List(terms)) => neighborhood(listing, terms, matcher),
        (Criterion::Amenities, V::TokenGroups(groups)) => amenities(listing, groups, matcher),
        (Criterion::Type, V::Text(s)) => property_type(listing, s, matcher),
        (Criterion::SaleType, V::Text(s)) => sale_type(listing, s),
        (Criterion::MinPrice, V::Float(min)) => min_price(listing, *min),
        (Criterion::MaxPrice, V::Float(max)) => max_price(listing, *max),
        (Criterion::MinSqFeet, V::Integer(min)) => min_sq_feet(listing, *min),
        (Criterion::MaxSqFeet, V::Integer(max)) => max_sq_feet(listing, *max),
        (Criterion::MinBathroomCount, V::Float(min)) => listing.bathrooms() >= *min,
        (Criterion::MaxBathroomCount, V::Float(max)) => listing.bathrooms() <= *max,
        (Criterion::MinBedroomCount, V::Integer(min)) => listing.bedrooms() >= *min as f64,
        (Criterion::MaxBedroomCount, V::Integer(max)) => listing.bedrooms() <= *max as f64,
        (Criterion::Borough, V::Text(s)) => borough(listing, s, matcher),
        (Criterion::Id, V::Text(s)) => id(listing, s),
        (criterion, value) => {
            trace!("Criterion {} cannot evaluate {:?}", criterion, value);
            false
        }
    }
}

/// Pass if any search term is a near-exact match for the listing neighborhood
///
/// An empty term list, or one led by a blank or `"0"` placeholder, matches
/// anything.
pub fn neighborhood<M>(listing: &Listing, terms: &[String], matcher: &M) -> bool
where
    M: TextMatcher + ?Sized,
{
    match terms.first().map(|first| first.trim()) {
        None | Some("") | Some("0") => return true,
        Some(_) => {}
    }

    let listed = listing.neighborhood().trim().to_lowercase();

    terms.iter().any(|term| {
        let term = term.trim().to_lowercase();
        matcher.similarity(&listed, &term) >= NEIGHBORHOOD_THRESHOLD
    })
}

/// Pass if every token group has a token inside some listing feature name
pub fn amenities<M>(listing: &Listing, groups: &[Vec<String>], matcher: &M) -> bool
where
    M: TextMatcher + ?Sized,
{
    let features: Vec<String> = listing.feature_names().into_iter().collect();

    groups
        .iter()
        .all(|group| matcher.contains_any_within(&features, group))
}

/// Pass if the ownership or the building type resembles the search type
pub fn property_type<M>(listing: &Listing, search: &str, matcher: &M) -> bool
where
    M: TextMatcher + ?Sized,
{
    if search.is_empty() {
        return true;
    }

    let ownership = listing.ownership().to_lowercase();
    let building_type = listing.building_type().to_lowercase();

    matcher.similarity(&ownership, search) >= TYPE_THRESHOLD
        || matcher.similarity(&building_type, search) >= TYPE_THRESHOLD
}

/// Pass if the listing's sale-or-rent field contains the normalized search
///
/// "sales property" reads as "sale", "rental" as "rent"; "sale" wins when
/// both occur.
pub fn sale_type(listing: &Listing, search: &str) -> bool {
    let normalized = if search.contains("sale") {
        "sale"
    } else if search.contains("rent") {
        "rent"
    } else {
        search
    };

    listing.sale_or_rent().to_lowercase().contains(normalized)
}

/// Rent for rentals, sale price for everything else
pub fn listing_price(listing: &Listing) -> f64 {
    if sale_type(listing, "rent") {
        listing.rent()
    } else {
        listing.sale_price()
    }
}

pub fn min_price(listing: &Listing, min: f64) -> bool {
    listing_price(listing) >= min
}

pub fn max_price(listing: &Listing, max: f64) -> bool {
    listing_price(listing) <= max
}

/// Listings without a square footage never pass a footage bound
pub fn min_sq_feet(listing: &Listing, min: i64) -> bool {
    let footage = listing.square_footage();
    footage != 0 && footage >= min
}

/// Listings without a square footage never pass a footage bound
pub fn max_sq_feet(listing: &Listing, max: i64) -> bool {
    let footage = listing.square_footage();
    footage != 0 && footage <= max
}

pub fn borough<M>(listing: &Listing, search: &str, matcher: &M) -> bool
where
    M: TextMatcher + ?Sized,
{
    let listed = listing.borough().to_lowercase();
    matcher.similarity(&listed, search) >= BOROUGH_THRESHOLD
}

pub fn id(listing: &Listing, search: &str) -> bool {
    listing.listing_id().trim() == search
}
