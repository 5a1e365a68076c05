//! Criterion registry
//!
//! The closed table of criterion names the filter understands, each mapped to
//! the value type its input is coerced to. Predicate dispatch lives in
//! [`crate::filter::predicate::evaluate`], keyed by the same enum.

use crate::error::FilterError;
use std::fmt;
use std::str::FromStr;

/// Value type a criterion's input is coerced to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Trimmed, lower-cased string
    Text,
    Float,
    /// Truncated integer
    Integer,
    /// Array of strings
    List,
    /// Array of strings split into token groups
    TokenGroups,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Text => "string",
            ValueKind::Float => "float",
            ValueKind::Integer => "int",
            ValueKind::List => "array",
            ValueKind::TokenGroups => "array",
        }
    }
}

/// Every criterion a listing can be filtered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    Type,
    SaleType,
    MinPrice,
    MaxPrice,
    MinSqFeet,
    MaxSqFeet,
    MinBathroomCount,
    MaxBathroomCount,
    MinBedroomCount,
    MaxBedroomCount,
    Neighborhood,
    Amenities,
    Borough,
    Id,
}

impl Criterion {
    /// All criteria in registry order
    pub const ALL: [Criterion; 14] = [
        Criterion::Type,
        Criterion::SaleType,
        Criterion::MinPrice,
        Criterion::MaxPrice,
        Criterion::MinSqFeet,
        Criterion::MaxSqFeet,
        Criterion::MinBathroomCount,
        Criterion::MaxBathroomCount,
        Criterion::MinBedroomCount,
        Criterion::MaxBedroomCount,
        Criterion::Neighborhood,
        Criterion::Amenities,
        Criterion::Borough,
        Criterion::Id,
    ];

    /// Resolve a criterion by its public name
    pub fn lookup(name: &str) -> Result<Criterion, FilterError> {
        Criterion::ALL
            .into_iter()
            .find(|criterion| criterion.name() == name)
            .ok_or_else(|| FilterError::UndefinedOperation(name.to_string()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Criterion::Type => "type",
            Criterion::SaleType => "sale_type",
            Criterion::MinPrice => "min_price",
            Criterion::MaxPrice => "max_price",
            Criterion::MinSqFeet => "min_sq_feet",
            Criterion::MaxSqFeet => "max_sq_feet",
            Criterion::MinBathroomCount => "min_bathroom_count",
            Criterion::MaxBathroomCount => "max_bathroom_count",
            Criterion::MinBedroomCount => "min_bedroom_count",
            Criterion::MaxBedroomCount => "max_bedroom_count",
            Criterion::Neighborhood => "neighborhood",
            Criterion::Amenities => "amenities",
            Criterion::Borough => "borough",
            Criterion::Id => "id",
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Criterion::Type | Criterion::SaleType | Criterion::Borough | Criterion::Id => {
                ValueKind::Text
            }
            Criterion::MinPrice
            | Criterion::MaxPrice
            | Criterion::MinBathroomCount
            | Criterion::MaxBathroomCount => ValueKind::Float,
            Criterion::MinSqFeet
            | Criterion::MaxSqFeet
            | Criterion::MinBedroomCount
            | Criterion::MaxBedroomCount => ValueKind::Integer,
            Criterion::Neighborhood => ValueKind::List,
            Criterion::Amenities => ValueKind::TokenGroups,
        }
    }
}

impl FromStr for Criterion {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Criterion::lookup(s)
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
