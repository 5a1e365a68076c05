//! Listing record types
//!
//! A listing is a nested, loosely typed JSON document produced by an external
//! feed. Only the sections the filter reads are named here; every other
//! top-level field is carried along untouched so results serialize back to
//! the same shape. Leaves are read through default-valued accessors: an
//! absent section reads as an empty record, an absent number as zero and an
//! absent string as "".

use crate::filter::coerce::{field_f64, field_i64, field_text};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// One nested section of a listing (`details`, `location`, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Section(Map<String, Value>);

impl Section {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Field names of this section
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Section {
    fn from(map: Map<String, Value>) -> Self {
        Section(map)
    }
}

/// Real-estate listing as delivered by the feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(default, deserialize_with = "lenient_section", skip_serializing_if = "Option::is_none")]
    pub location: Option<Section>,

    #[serde(default, deserialize_with = "lenient_section", skip_serializing_if = "Option::is_none")]
    pub details: Option<Section>,

    #[serde(
        rename = "building-details",
        default,
        deserialize_with = "lenient_section",
        skip_serializing_if = "Option::is_none"
    )]
    pub building_details: Option<Section>,

    #[serde(
        rename = "apartment-features",
        default,
        deserialize_with = "lenient_section",
        skip_serializing_if = "Option::is_none"
    )]
    pub apartment_features: Option<Section>,

    #[serde(
        rename = "sale-terms",
        default,
        deserialize_with = "lenient_section",
        skip_serializing_if = "Option::is_none"
    )]
    pub sale_terms: Option<Section>,

    #[serde(
        rename = "rental-terms",
        default,
        deserialize_with = "lenient_section",
        skip_serializing_if = "Option::is_none"
    )]
    pub rental_terms: Option<Section>,

    /// Fields the filter never reads
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Sections that are not JSON objects are treated as absent
fn lenient_section<'de, D>(deserializer: D) -> Result<Option<Section>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(map) => Some(Section(map)),
        _ => None,
    })
}

fn leaf<'a>(section: &'a Option<Section>, key: &str) -> Option<&'a Value> {
    section.as_ref().and_then(|s| s.get(key))
}

impl Listing {
    /// Build a listing from an already decoded JSON value
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// `location.neighborhood`
    pub fn neighborhood(&self) -> String {
        field_text(leaf(&self.location, "neighborhood"))
    }

    /// `location.borough`
    pub fn borough(&self) -> String {
        field_text(leaf(&self.location, "borough"))
    }

    /// `details.sale-or-rent`
    pub fn sale_or_rent(&self) -> String {
        field_text(leaf(&self.details, "sale-or-rent"))
    }

    /// `details.approx-square-footage`, read as an integer
    pub fn square_footage(&self) -> i64 {
        field_i64(leaf(&self.details, "approx-square-footage"))
    }

    /// `details.num-baths`
    pub fn bathrooms(&self) -> f64 {
        field_f64(leaf(&self.details, "num-baths"))
    }

    /// `details.num-bedrooms`
    pub fn bedrooms(&self) -> f64 {
        field_f64(leaf(&self.details, "num-bedrooms"))
    }

    /// `details.listing-id`, stringified
    pub fn listing_id(&self) -> String {
        field_text(leaf(&self.details, "listing-id"))
    }

    /// `building-details.ownership`
    pub fn ownership(&self) -> String {
        field_text(leaf(&self.building_details, "ownership"))
    }

    /// `building-details.building-type`
    pub fn building_type(&self) -> String {
        field_text(leaf(&self.building_details, "building-type"))
    }

    /// `sale-terms.price`
    pub fn sale_price(&self) -> f64 {
        field_f64(leaf(&self.sale_terms, "price"))
    }

    /// `rental-terms.rent`
    pub fn rent(&self) -> f64 {
        field_f64(leaf(&self.rental_terms, "rent"))
    }

    /// Lower-cased field names of both feature-bearing sections
    ///
    /// Every key of `apartment-features` and `building-details` is an
    /// amenity token, whatever its value.
    pub fn feature_names(&self) -> BTreeSet<String> {
        [&self.apartment_features, &self.building_details]
            .into_iter()
            .flatten()
            .flat_map(|section| section.keys())
            .map(str::to_lowercase)
            .collect()
    }
}
