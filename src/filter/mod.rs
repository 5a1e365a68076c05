//! Listing filtering with fuzzy and range criteria
//!
//! Criteria are bound by name, coerced to their declared type, and applied to
//! every listing in a single pass with offset/limit windowing.

pub mod coerce;
pub mod engine;
pub mod fuzzy;
pub mod predicate;
pub mod query;
pub mod registry;
pub mod store;

#[cfg(test)]
mod property_tests;

pub use engine::ListingFilter;
pub use fuzzy::{FuzzyMatcher, TextMatcher};
pub use query::{CriterionValue, QueryBuilder, QueryState};
pub use registry::{Criterion, ValueKind};
pub use store::{FilterState, ListingStore};
