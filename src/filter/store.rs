//! Listing storage
//!
//! Holds the full listing collection and the most recent search result. The
//! result is kept as positions into the full collection, so it is always a
//! subset of it.

use crate::listing::Listing;

/// Whether the found set reflects a search or the whole collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    /// Found set equals the full collection
    Unfiltered,
    /// Found set is the result of the last search
    Filtered,
}

#[derive(Debug, Clone)]
pub struct ListingStore {
    all: Vec<Listing>,
    found: Vec<usize>,
    state: FilterState,
}

impl ListingStore {
    pub fn new(listings: Vec<Listing>) -> Self {
        let found = (0..listings.len()).collect();
        Self {
            all: listings,
            found,
            state: FilterState::Unfiltered,
        }
    }

    /// Swap in a new collection; the found set becomes all of it
    pub fn replace(&mut self, listings: Vec<Listing>) {
        *self = Self::new(listings);
    }

    /// Drop the last result; the found set becomes the full collection
    pub fn reset(&mut self) {
        self.found = (0..self.all.len()).collect();
        self.state = FilterState::Unfiltered;
    }

    /// Record a search result given as positions into the full collection
    pub fn set_found(&mut self, positions: Vec<usize>) {
        debug_assert!(positions.iter().all(|&p| p < self.all.len()));
        self.found = positions;
        self.state = FilterState::Filtered;
    }

    pub fn all(&self) -> &[Listing] {
        &self.all
    }

    pub fn found(&self) -> Vec<&Listing> {
        self.found
            .iter()
            .filter_map(|&position| self.all.get(position))
            .collect()
    }

    pub fn found_len(&self) -> usize {
        self.found.len()
    }

    pub fn state(&self) -> FilterState {
        self.state
    }
}
