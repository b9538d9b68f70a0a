//! Parameter validation.
//!
//! Every endpoint parameter set implements [`QueryParameters`], turning a
//! typed record into a normalized [`QueryParams`] mapping or a single
//! aggregated [`ValueError`]. Validation is pure; nothing here touches the
//! network.
//!
//! Normalization rules:
//!
//! - strings are trimmed, and must not be empty afterwards
//! - optional values that are `None` are omitted from the mapping entirely
//! - enum values are replaced by their wire token
//!
//! ## Examples
//!
//! ```rust
//! use taginfo::params::ParamsBuilder;
//!
//! let query = ParamsBuilder::new()
//!     .text("key", "  highway ")
//!     .optional_text("query", None)
//!     .pagination(1, 0)
//!     .finish()
//!     .unwrap();
//!
//! assert_eq!(query.get("key"), Some("highway"));
//! assert_eq!(query.get("query"), None);
//! assert_eq!(query.to_query_string(), "key=highway&page=1&rp=0");
//! ```

mod choice;

use std::collections::BTreeMap;

pub use choice::{Choice, WireEnum};

use crate::error::{ParamFault, ValueError};

/// Validated query-string parameters, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<&'static str, String>);

impl QueryParams {
    /// Returns the value for `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Returns `true` if no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Encodes the parameters as an `application/x-www-form-urlencoded` string.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

/// A typed parameter set that can be validated into query parameters.
pub trait QueryParameters {
    /// Validates every field and returns the normalized mapping.
    ///
    /// ## Errors
    ///
    /// Returns a [`ValueError`] carrying every violated constraint.
    fn to_query(&self) -> Result<QueryParams, ValueError>;
}

/// Endpoints without parameters.
impl QueryParameters for () {
    fn to_query(&self) -> Result<QueryParams, ValueError> {
        Ok(QueryParams::default())
    }
}

/// Accumulates validated parameters and faults.
///
/// Every check runs even after an earlier one failed, so the resulting
/// [`ValueError`] reports all problems at once.
#[derive(Debug, Default)]
pub struct ParamsBuilder {
    params: BTreeMap<&'static str, String>,
    faults: Vec<ParamFault>,
}

impl ParamsBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a required string that must be non-empty after trimming.
    pub fn text(mut self, field: &'static str, value: &str) -> Self {
        match non_blank(value) {
            Some(v) => {
                self.params.insert(field, v.to_string());
            }
            None => self.faults.push(ParamFault::Blank { field }),
        }
        self
    }

    /// Adds an optional string; `None` is omitted, but a present value
    /// must still be non-empty after trimming.
    pub fn optional_text(self, field: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.text(field, v),
            None => self,
        }
    }

    /// Adds an integer that must be strictly positive.
    pub fn positive(self, field: &'static str, value: i64) -> Self {
        self.int(field, value, value > 0, "> 0")
    }

    /// Adds an integer that must be zero or positive.
    pub fn non_negative(self, field: &'static str, value: i64) -> Self {
        self.int(field, value, value >= 0, ">= 0")
    }

    /// Adds the `page` (> 0) and `rp` (>= 0) pair used by paginated endpoints.
    ///
    /// `rp=0` is passed through unchanged; the API decides what it means.
    pub fn pagination(self, page: i64, rp: i64) -> Self {
        self.positive("page", page).non_negative("rp", rp)
    }

    /// Adds a float that must be finite and within `[min, max]`.
    pub fn bounded(mut self, field: &'static str, value: f64, min: f64, max: f64) -> Self {
        if value.is_finite() && (min..=max).contains(&value) {
            self.params.insert(field, value.to_string());
        } else {
            self.faults.push(ParamFault::FloatOutOfRange {
                field,
                value,
                min,
                max,
            });
        }
        self
    }

    /// Adds an enum parameter as its wire token.
    pub fn choice<E: WireEnum>(mut self, field: &'static str, value: &Choice<E>) -> Self {
        match value.resolve() {
            Some(v) => {
                self.params.insert(field, v.as_ref().to_string());
            }
            None => {
                let token = match value {
                    Choice::Token(t) => t.clone(),
                    Choice::Variant(v) => v.as_ref().to_string(),
                };
                self.faults.push(ParamFault::UnknownVariant {
                    field,
                    token,
                    expected: E::VARIANTS,
                });
            }
        }
        self
    }

    /// Finishes validation.
    ///
    /// ## Errors
    ///
    /// Returns a [`ValueError`] if any check failed.
    pub fn finish(self) -> Result<QueryParams, ValueError> {
        if self.faults.is_empty() {
            Ok(QueryParams(self.params))
        } else {
            Err(ValueError::from(self.faults))
        }
    }

    fn int(mut self, field: &'static str, value: i64, ok: bool, expected: &'static str) -> Self {
        if ok {
            self.params.insert(field, value.to_string());
        } else {
            self.faults.push(ParamFault::IntOutOfRange {
                field,
                value,
                expected,
            });
        }
        self
    }
}

/// Trims `value`, returning `None` if nothing is left.
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ObjectType, SortOrder};
    use strum::VariantNames;

    #[test]
    fn test_text_is_trimmed() {
        let query = ParamsBuilder::new().text("key", "   some key ").finish().unwrap();
        assert_eq!(query.get("key"), Some("some key"));
    }

    #[test]
    fn test_blank_text_rejected() {
        for blank in ["", "   ", "\t\n"] {
            let err = ParamsBuilder::new().text("key", blank).finish().unwrap_err();
            assert_eq!(err.faults(), &[ParamFault::Blank { field: "key" }]);
        }
    }

    #[test]
    fn test_optional_text() {
        let query = ParamsBuilder::new().optional_text("query", None).finish().unwrap();
        assert!(query.is_empty());

        let err = ParamsBuilder::new()
            .optional_text("query", Some("   "))
            .finish()
            .unwrap_err();
        assert!(err.rejects("query"));
    }

    #[test]
    fn test_pagination_bounds() {
        let query = ParamsBuilder::new().pagination(1, 0).finish().unwrap();
        assert_eq!(query.get("page"), Some("1"));
        assert_eq!(query.get("rp"), Some("0"));

        let err = ParamsBuilder::new().pagination(0, -1).finish().unwrap_err();
        assert!(err.rejects("page"));
        assert!(err.rejects("rp"));
        assert_eq!(err.faults().len(), 2);
    }

    #[test]
    fn test_bounded_float() {
        let query = ParamsBuilder::new()
            .bounded("min_fraction", 0.01, 0.01, 1.0)
            .finish()
            .unwrap();
        assert_eq!(query.get("min_fraction"), Some("0.01"));

        for bad in [0.001, 1.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = ParamsBuilder::new()
                .bounded("min_fraction", bad, 0.01, 1.0)
                .finish()
                .unwrap_err();
            assert!(err.rejects("min_fraction"), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_choice_maps_to_wire_token() {
        let query = ParamsBuilder::new()
            .choice("sortorder", &Choice::from(SortOrder::Desc))
            .choice("filter", &Choice::<ObjectType>::token("ways"))
            .finish()
            .unwrap();
        assert_eq!(query.get("sortorder"), Some("desc"));
        assert_eq!(query.get("filter"), Some("ways"));
    }

    #[test]
    fn test_unknown_token_rejected() {
        let err = ParamsBuilder::new()
            .choice("filter", &Choice::<ObjectType>::token("yes"))
            .finish()
            .unwrap_err();
        match &err.faults()[0] {
            ParamFault::UnknownVariant { token, expected, .. } => {
                assert_eq!(token, "yes");
                assert_eq!(*expected, ObjectType::VARIANTS);
            }
            other => panic!("unexpected fault: {other:?}"),
        }
    }

    #[test]
    fn test_query_string_is_sorted_and_encoded() {
        let query = ParamsBuilder::new()
            .text("query", "addr:street")
            .pagination(2, 3)
            .finish()
            .unwrap();
        assert_eq!(query.to_query_string(), "page=2&query=addr%3Astreet&rp=3");
    }

    #[test]
    fn test_unit_has_no_params() {
        assert!(().to_query().unwrap().is_empty());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  x "), Some("x"));
        assert_eq!(non_blank("   "), None);
    }
}
