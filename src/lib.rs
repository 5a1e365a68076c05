//! listing-filter
//!
//! Filters real-estate listing feeds by named criteria (price, rooms, square
//! footage, neighborhood, amenities, ...) and pages through the result.
//!
//! ```no_run
//! use listing_filter::{source, ListingFilter};
//!
//! # fn main() -> Result<(), listing_filter::FilterError> {
//! let listings = source::load_listings("feed.json")?;
//! let mut filter = ListingFilter::new(listings);
//! let found = filter
//!     .min_bedroom_count(5)?
//!     .neighborhood(vec!["East Village"])?
//!     .max_price(3000)?
//!     .search(0, 150)
//!     .get_listings();
//! println!("{} listings", found.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod filter;
pub mod listing;
pub mod source;

pub use error::FilterError;
pub use filter::{Criterion, FilterState, FuzzyMatcher, ListingFilter, TextMatcher};
pub use listing::Listing;
