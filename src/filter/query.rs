//! Query building
//!
//! Validates criterion names against the registry, coerces raw input values
//! to each criterion's declared type and accumulates the active criteria.

use super::coerce::{is_empty_value, scalar_to_f64, scalar_to_i64, scalar_to_string};
use super::registry::{Criterion, ValueKind};
use crate::error::FilterError;
use serde_json::Value;
use tracing::debug;

/// Amenity tokens this short or shorter carry no signal ("in", "w/", ...)
const MIN_TOKEN_CHARS: usize = 3;

/// A coerced criterion value
#[derive(Debug, Clone, PartialEq)]
pub enum CriterionValue {
    Text(String),
    Float(f64),
    Integer(i64),
    List(Vec<String>),
    /// OR within a group, AND across groups
    TokenGroups(Vec<Vec<String>>),
}

/// Active criteria in the order they were first set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    entries: Vec<(Criterion, CriterionValue)>,
}

impl QueryState {
    /// Store a value, replacing any previous value for the criterion in place
    pub fn insert(&mut self, criterion: Criterion, value: CriterionValue) {
        match self.entries.iter_mut().find(|(c, _)| *c == criterion) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((criterion, value)),
        }
    }

    pub fn remove(&mut self, criterion: Criterion) -> Option<CriterionValue> {
        let index = self.entries.iter().position(|(c, _)| *c == criterion)?;
        Some(self.entries.remove(index).1)
    }

    pub fn get(&self, criterion: Criterion) -> Option<&CriterionValue> {
        self.entries
            .iter()
            .find(|(c, _)| *c == criterion)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Criterion, &CriterionValue)> {
        self.entries.iter().map(|(c, value)| (*c, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Accumulates criteria from named, loosely typed inputs
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    state: QueryState,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a criterion by name
    ///
    /// An empty input (null, false, zero, "", "0", empty array) means "no
    /// filter requested" and leaves the builder unchanged. This makes a zero
    /// bound such as `min_price = 0` impossible to set.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Self, FilterError> {
        let criterion = Criterion::lookup(name)?;
        self.set_criterion(criterion, value.into())
    }

    /// Set an already resolved criterion
    pub fn set_criterion(
        &mut self,
        criterion: Criterion,
        value: Value,
    ) -> Result<&mut Self, FilterError> {
        if is_empty_value(&value) {
            debug!("Skipping criterion {}: empty value", criterion);
            return Ok(self);
        }

        match coerce(criterion, &value)? {
            CriterionValue::TokenGroups(groups) if groups.is_empty() => {
                debug!("Dropping criterion {}: no usable tokens", criterion);
                self.state.remove(criterion);
            }
            coerced => self.state.insert(criterion, coerced),
        }

        Ok(self)
    }

    /// Replace the amenities criterion with one token group per input string
    ///
    /// If no group survives tokenization the criterion is removed.
    pub fn amenities<I, S>(&mut self, amenities: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let groups = token_groups(amenities);
        if groups.is_empty() {
            self.state.remove(Criterion::Amenities);
        } else {
            self.state
                .insert(Criterion::Amenities, CriterionValue::TokenGroups(groups));
        }
        self
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn clear(&mut self) {
        self.state.clear();
    }
}

/// Generate one typed setter per registry criterion on a type that has a
/// `set_criterion(Criterion, Value)` method
macro_rules! criterion_setters {
    ([$($impl_header:tt)*]) => {
        $($impl_header)* {
            criterion_setters!(@setters
                property_type => Type,
                sale_type => SaleType,
                min_price => MinPrice,
                max_price => MaxPrice,
                min_sq_feet => MinSqFeet,
                max_sq_feet => MaxSqFeet,
                min_bathroom_count => MinBathroomCount,
                max_bathroom_count => MaxBathroomCount,
                min_bedroom_count => MinBedroomCount,
                max_bedroom_count => MaxBedroomCount,
                neighborhood => Neighborhood,
                borough => Borough,
                id => Id,
            );
        }
    };
    (@setters $($method:ident => $criterion:ident,)*) => {
        $(
            #[doc = concat!("Set the `", stringify!($criterion), "` criterion; see `set`")]
            pub fn $method(
                &mut self,
                value: impl Into<::serde_json::Value>,
            ) -> Result<&mut Self, $crate::error::FilterError> {
                self.set_criterion($crate::filter::registry::Criterion::$criterion, value.into())
            }
        )*
    };
}

pub(crate) use criterion_setters;

criterion_setters!([impl QueryBuilder]);

/// Coerce a raw value to the criterion's declared type
pub fn coerce(criterion: Criterion, value: &Value) -> Result<CriterionValue, FilterError> {
    let name = criterion.name();
    let kind = criterion.kind();
    let invalid = || FilterError::invalid_argument(name, kind.as_str());

    match kind {
        ValueKind::Text => scalar_to_string(value)
            .map(|s| CriterionValue::Text(s.trim().to_lowercase()))
            .ok_or_else(invalid),
        ValueKind::Float => scalar_to_f64(value)
            .map(CriterionValue::Float)
            .ok_or_else(invalid),
        ValueKind::Integer => scalar_to_i64(value)
            .map(CriterionValue::Integer)
            .ok_or_else(invalid),
        ValueKind::List => match value {
            Value::Array(items) => Ok(CriterionValue::List(stringify_items(items))),
            _ => Err(invalid()),
        },
        ValueKind::TokenGroups => match value {
            Value::Array(items) => Ok(CriterionValue::TokenGroups(token_groups(
                stringify_items(items),
            ))),
            _ => Err(invalid()),
        },
    }
}

fn stringify_items(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .map(|item| scalar_to_string(item).unwrap_or_else(|| item.to_string()))
        .collect()
}

/// Split each amenity phrase into lower-cased whitespace tokens
///
/// Tokens shorter than three characters are dropped, then groups left empty
/// are dropped too.
pub fn token_groups<I, S>(amenities: I) -> Vec<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut groups = Vec::new();

    for amenity in amenities {
        let group: Vec<String> = amenity
            .as_ref()
            .split_whitespace()
            .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
            .map(str::to_lowercase)
            .collect();

        if !group.is_empty() {
            groups.push(group);
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_unknown_criterion() {
        let mut builder = QueryBuilder::new();
        let err = builder.set("num_rooms", 3).unwrap_err();
        assert!(matches!(err, FilterError::UndefinedOperation(_)));
        assert!(builder.state().is_empty());
    }

    #[test]
    fn test_set_text_trims_and_lowercases() {
        let mut builder = QueryBuilder::new();
        builder.set("borough", "  Manhattan ").unwrap();
        assert_eq!(
            builder.state().get(Criterion::Borough),
            Some(&CriterionValue::Text("manhattan".to_string()))
        );
    }

    #[test]
    fn test_set_numbers_are_cast() {
        let mut builder = QueryBuilder::new();
        builder
            .set("min_bedroom_count", "5")
            .unwrap()
            .set("max_sq_feet", 1200.9)
            .unwrap()
            .set("max_price", "3000.50")
            .unwrap()
            .set("min_bathroom_count", "many")
            .unwrap();

        let state = builder.state();
        assert_eq!(state.get(Criterion::MinBedroomCount), Some(&CriterionValue::Integer(5)));
        assert_eq!(state.get(Criterion::MaxSqFeet), Some(&CriterionValue::Integer(1200)));
        assert_eq!(state.get(Criterion::MaxPrice), Some(&CriterionValue::Float(3000.5)));
        assert_eq!(state.get(Criterion::MinBathroomCount), Some(&CriterionValue::Float(0.0)));
    }

    #[test]
    fn test_empty_values_are_no_ops() {
        let mut builder = QueryBuilder::new();
        builder.set("min_price", 0).unwrap();
        builder.set("borough", "").unwrap();
        builder.set("type", "0").unwrap();
        builder.set("neighborhood", json!([])).unwrap();
        builder.set("id", Value::Null).unwrap();
        assert!(builder.state().is_empty());
    }

    #[test]
    fn test_empty_value_keeps_previous() {
        let mut builder = QueryBuilder::new();
        builder.set("max_price", 2500).unwrap();
        builder.set("max_price", 0).unwrap();
        assert_eq!(
            builder.state().get(Criterion::MaxPrice),
            Some(&CriterionValue::Float(2500.0))
        );
    }

    #[test]
    fn test_array_criterion_rejects_scalar() {
        let mut builder = QueryBuilder::new();
        let err = builder.set("neighborhood", "Soho").unwrap_err();
        assert!(matches!(
            err,
            FilterError::InvalidArgument { ref criterion, expected: "array" } if criterion == "neighborhood"
        ));
    }

    #[test]
    fn test_scalar_criterion_rejects_array() {
        let mut builder = QueryBuilder::new();
        let err = builder.set("min_price", json!([1000])).unwrap_err();
        assert!(matches!(err, FilterError::InvalidArgument { expected: "float", .. }));
    }

    #[test]
    fn test_overwrite_keeps_insertion_order() {
        let mut builder = QueryBuilder::new();
        builder.set("borough", "brooklyn").unwrap();
        builder.set("min_bedroom_count", 2).unwrap();
        builder.set("borough", "queens").unwrap();

        let order: Vec<Criterion> = builder.state().iter().map(|(c, _)| c).collect();
        assert_eq!(order, vec![Criterion::Borough, Criterion::MinBedroomCount]);
        assert_eq!(
            builder.state().get(Criterion::Borough),
            Some(&CriterionValue::Text("queens".to_string()))
        );
    }

    #[test]
    fn test_neighborhood_items_stringified() {
        let mut builder = QueryBuilder::new();
        builder.set("neighborhood", json!(["East Village", 0])).unwrap();
        assert_eq!(
            builder.state().get(Criterion::Neighborhood),
            Some(&CriterionValue::List(vec![
                "East Village".to_string(),
                "0".to_string()
            ]))
        );
    }

    #[test]
    fn test_typed_setters() {
        let mut builder = QueryBuilder::new();
        builder
            .min_bedroom_count(5)
            .unwrap()
            .property_type("Condo")
            .unwrap()
            .neighborhood(vec!["Soho", "Tribeca"])
            .unwrap();

        let order: Vec<Criterion> = builder.state().iter().map(|(c, _)| c).collect();
        assert_eq!(
            order,
            vec![Criterion::MinBedroomCount, Criterion::Type, Criterion::Neighborhood]
        );
        assert_eq!(
            builder.state().get(Criterion::Type),
            Some(&CriterionValue::Text("condo".to_string()))
        );
    }

    #[test]
    fn test_token_groups() {
        let groups = token_groups(["Swimming Pool", "gym", "w/ d", "Live in Super"]);
        assert_eq!(
            groups,
            vec![
                vec!["swimming".to_string(), "pool".to_string()],
                vec!["gym".to_string()],
                vec!["live".to_string(), "super".to_string()],
            ]
        );
    }

    #[test]
    fn test_amenities_replace_previous_groups() {
        let mut builder = QueryBuilder::new();
        builder.amenities(["doorman"]);
        builder.amenities(["pool", "gym"]);
        assert_eq!(
            builder.state().get(Criterion::Amenities),
            Some(&CriterionValue::TokenGroups(vec![
                vec!["pool".to_string()],
                vec!["gym".to_string()]
            ]))
        );
    }

    #[test]
    fn test_amenities_without_usable_tokens_removed() {
        let mut builder = QueryBuilder::new();
        builder.amenities(["doorman"]);
        builder.amenities(["a", "to"]);
        assert!(builder.state().get(Criterion::Amenities).is_none());
    }

    #[test]
    fn test_amenities_through_set() {
        let mut builder = QueryBuilder::new();
        builder.set("amenities", json!(["Roof Deck"])).unwrap();
        assert_eq!(
            builder.state().get(Criterion::Amenities),
            Some(&CriterionValue::TokenGroups(vec![vec![
                "roof".to_string(),
                "deck".to_string()
            ]]))
        );

        let err = builder.set("amenities", "pool").unwrap_err();
        assert!(matches!(err, FilterError::InvalidArgument { .. }));
    }
}
