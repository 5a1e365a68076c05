//! Listing feed loading
//!
//! A feed is a JSON document holding listings either as a bare array or
//! under a `listing` key of a feed object. Feeds converted from XML
//! sometimes carry a single listing object instead of an array; that is
//! accepted too. Entries that are not JSON objects are skipped.

use crate::error::FilterError;
use crate::listing::Listing;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

/// Key of the listing collection inside a feed object
const FEED_LISTING_KEY: &str = "listing";

/// Parse listings from a JSON string
pub fn parse_listings(json: &str) -> Result<Vec<Listing>, FilterError> {
    let document: Value = serde_json::from_str(json)?;
    listings_from_document(document)
}

/// Parse listings from any reader yielding a JSON document
pub fn read_listings<R: Read>(reader: R) -> Result<Vec<Listing>, FilterError> {
    let document: Value = serde_json::from_reader(reader)?;
    listings_from_document(document)
}

/// Load listings from a JSON feed file
pub fn load_listings(path: impl AsRef<Path>) -> Result<Vec<Listing>, FilterError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let listings = read_listings(BufReader::new(file))?;
    info!("Loaded {} listings from {}", listings.len(), path.display());
    Ok(listings)
}

/// Extract listings from an already decoded feed document
pub fn listings_from_document(document: Value) -> Result<Vec<Listing>, FilterError> {
    let entries = match document {
        Value::Array(entries) => entries,
        Value::Object(mut feed) => match feed.remove(FEED_LISTING_KEY) {
            Some(Value::Array(entries)) => entries,
            Some(single @ Value::Object(_)) => vec![single],
            Some(other) => {
                return Err(FilterError::MissingListings(format!(
                    "`{}` is not an array (found {})",
                    FEED_LISTING_KEY,
                    type_name(&other)
                )))
            }
            None => {
                return Err(FilterError::MissingListings(format!(
                    "feed object has no `{}` key",
                    FEED_LISTING_KEY
                )))
            }
        },
        other => {
            return Err(FilterError::MissingListings(format!(
                "document is {}, expected an array or a feed object",
                type_name(&other)
            )))
        }
    };

    let total = entries.len();
    let mut listings = Vec::with_capacity(total);

    for (index, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            warn!("Skipping feed entry {}: {} is not a listing", index, type_name(&entry));
            continue;
        }
        listings.push(serde_json::from_value(entry)?);
    }

    if listings.len() < total {
        debug!("Kept {} of {} feed entries", listings.len(), total);
    }

    Ok(listings)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
