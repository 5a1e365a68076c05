//! Listing filter engine
//!
//! Ties together criterion building, predicate evaluation and the listing
//! store. A search is a single linear pass over the full collection that
//! applies every active criterion (AND, short-circuiting) and windows the
//! passing listings by offset and limit as it goes.

use super::fuzzy::{FuzzyMatcher, TextMatcher};
use super::predicate::evaluate;
use super::query::{criterion_setters, QueryBuilder, QueryState};
use super::registry::Criterion;
use super::store::{FilterState, ListingStore};
use crate::error::FilterError;
use crate::listing::Listing;
use serde_json::Value;
use tracing::{debug, trace};

/// Filters a listing collection by named criteria
pub struct ListingFilter<M = FuzzyMatcher> {
    store: ListingStore,
    query: QueryBuilder,
    matcher: M,
}

impl ListingFilter<FuzzyMatcher> {
    /// Create a filter over `listings` using the default text matcher
    pub fn new(listings: Vec<Listing>) -> Self {
        Self::with_matcher(listings, FuzzyMatcher::new())
    }
}

impl<M: TextMatcher> ListingFilter<M> {
    /// Create a filter with a custom text matcher
    pub fn with_matcher(listings: Vec<Listing>, matcher: M) -> Self {
        Self {
            store: ListingStore::new(listings),
            query: QueryBuilder::new(),
            matcher,
        }
    }

    /// Set a criterion by name; see [`QueryBuilder::set`]
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Self, FilterError> {
        self.query.set(name, value)?;
        Ok(self)
    }

    pub fn set_criterion(
        &mut self,
        criterion: Criterion,
        value: Value,
    ) -> Result<&mut Self, FilterError> {
        self.query.set_criterion(criterion, value)?;
        Ok(self)
    }

    /// Require amenities; see [`QueryBuilder::amenities`]
    pub fn amenities<I, S>(&mut self, amenities: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.query.amenities(amenities);
        self
    }

    /// Active criteria
    pub fn criteria(&self) -> &QueryState {
        self.query.state()
    }

    /// Scan the full collection and keep the passing listings in the window
    ///
    /// `offset` is the 1-based rank among passing listings of the first one
    /// to keep (0 and 1 both start at the first); a negative offset reads as
    /// 0. `limit <= 0` keeps every passing listing from the offset on. The
    /// scan always visits every listing.
    pub fn search(&mut self, offset: i64, limit: i64) -> &mut Self {
        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = if limit > 0 {
            usize::try_from(limit).unwrap_or(usize::MAX)
        } else {
            usize::MAX
        };

        let mut found = Vec::new();
        let mut matched_count: usize = 1;

        for (position, listing) in self.store.all().iter().enumerate() {
            if !self.passes(listing) {
                continue;
            }

            if offset <= matched_count && found.len() < limit {
                found.push(position);
            }
            matched_count += 1;
        }

        debug!(
            "Search over {} listings with {} criteria: {} passed, {} kept",
            self.store.all().len(),
            self.query.state().len(),
            matched_count - 1,
            found.len()
        );

        self.store.set_found(found);
        self
    }

    /// Find a single listing by id
    ///
    /// Sets the `id` criterion alongside the active ones, then keeps the
    /// first match. An empty id (`""` or `"0"`) sets nothing, like any other
    /// empty criterion value, so the search runs on whatever criteria are
    /// already active.
    pub fn find(&mut self, id: &str) -> Option<&Listing> {
        if let Err(e) = self.query.set_criterion(Criterion::Id, Value::from(id)) {
            debug!("Find could not set id criterion: {}", e);
            return None;
        }

        self.search(0, 1);
        self.store.found().into_iter().next()
    }

    /// Listings kept by the last search, or every listing when unfiltered
    pub fn get_listings(&self) -> Vec<&Listing> {
        self.store.found()
    }

    /// Page through the current result after the fact
    ///
    /// A positive `offset` is 1-based, 0 is the start, a negative offset
    /// yields nothing. `limit <= 0` means the rest of the result.
    pub fn get_listings_from(&self, offset: i64, limit: i64) -> Vec<&Listing> {
        if offset < 0 {
            return Vec::new();
        }

        let listings = self.store.found();
        let start = usize::try_from(offset.saturating_sub(1).max(0)).unwrap_or(0);
        let limit = if limit > 0 {
            usize::try_from(limit).unwrap_or(usize::MAX)
        } else {
            listings.len()
        };

        listings.into_iter().skip(start).take(limit).collect()
    }

    /// Every listing, ignoring criteria
    pub fn get_all_listings(&self) -> &[Listing] {
        self.store.all()
    }

    /// Clear every criterion and the last result
    pub fn reset(&mut self) -> &mut Self {
        self.query.clear();
        self.store.reset();
        self
    }

    /// Replace the listing collection; criteria and result are cleared
    pub fn set_listings(&mut self, listings: Vec<Listing>) -> &mut Self {
        self.store.replace(listings);
        self.reset()
    }

    pub fn state(&self) -> FilterState {
        self.store.state()
    }

    fn passes(&self, listing: &Listing) -> bool {
        self.query.state().iter().all(|(criterion, value)| {
            let pass = evaluate(criterion, listing, value, &self.matcher);
            if !pass {
                trace!(
                    "Listing {:?} rejected by {}",
                    listing.listing_id(),
                    criterion
                );
            }
            pass
        })
    }
}

criterion_setters!([impl<M: TextMatcher> ListingFilter<M>]);
