//! List filters and their query-string encoding.
//!
//! A [`Filter`] keeps entries in insertion order, and that order is the order
//! of the emitted query parameters:
//!
//! ```
//! use yoo_checkout::filter::{build_query, Filter};
//!
//! let filter = Filter::new()
//!     .gte("created_at", "2021-01-27T13:58:02.977Z")
//!     .limit(20);
//! assert_eq!(
//!     build_query(&filter),
//!     "?created_at.gte=2021-01-27T13:58:02.977Z&limit=20"
//! );
//! ```

use std::fmt;

/// Comparison operator applied to a filter field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterMode {
    Gt,
    Gte,
    Lt,
    Lte,
    /// Any operator the API accepts that has no variant here.
    Other(String),
}

impl FilterMode {
    pub fn as_str(&self) -> &str {
        match self {
            FilterMode::Gt => "gt",
            FilterMode::Gte => "gte",
            FilterMode::Lt => "lt",
            FilterMode::Lte => "lte",
            FilterMode::Other(mode) => mode,
        }
    }
}

impl From<&str> for FilterMode {
    fn from(mode: &str) -> Self {
        match mode {
            "gt" => FilterMode::Gt,
            "gte" => FilterMode::Gte,
            "lt" => FilterMode::Lt,
            "lte" => FilterMode::Lte,
            other => FilterMode::Other(other.to_string()),
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of one filter entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// Plain equality: `field=value`.
    Eq(String),
    /// Comparison: `field.mode=value`.
    Compare { value: String, mode: FilterMode },
}

/// Ordered mapping from field name to [`FilterValue`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    entries: Vec<(String, FilterValue)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field. An existing field keeps its position and gets the new value.
    pub fn insert(&mut self, field: impl Into<String>, value: FilterValue) {
        let field = field.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((field, value)),
        }
    }

    pub fn equal(mut self, field: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(field, FilterValue::Eq(value.to_string()));
        self
    }

    pub fn compare(
        mut self,
        field: impl Into<String>,
        mode: impl Into<FilterMode>,
        value: impl fmt::Display,
    ) -> Self {
        self.insert(
            field,
            FilterValue::Compare {
                value: value.to_string(),
                mode: mode.into(),
            },
        );
        self
    }

    pub fn gt(self, field: impl Into<String>, value: impl fmt::Display) -> Self {
        self.compare(field, FilterMode::Gt, value)
    }

    pub fn gte(self, field: impl Into<String>, value: impl fmt::Display) -> Self {
        self.compare(field, FilterMode::Gte, value)
    }

    pub fn lt(self, field: impl Into<String>, value: impl fmt::Display) -> Self {
        self.compare(field, FilterMode::Lt, value)
    }

    pub fn lte(self, field: impl Into<String>, value: impl fmt::Display) -> Self {
        self.compare(field, FilterMode::Lte, value)
    }

    /// Page size.
    pub fn limit(self, limit: u32) -> Self {
        self.equal("limit", limit)
    }

    /// Continue a listing from a previous page's `next_cursor`.
    pub fn cursor(self, cursor: impl Into<String>) -> Self {
        self.equal("cursor", cursor.into())
    }

    pub fn get(&self, field: &str) -> Option<&FilterValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Owned copy of the caller's filter, or an empty one when none was given.
pub fn normalize_filter(filters: Option<&Filter>) -> Filter {
    filters.cloned().unwrap_or_default()
}

/// Encode a filter as a query string.
///
/// Returns `""` for an empty filter, otherwise `?` followed by the
/// `&`-joined entries. Values are emitted as-is, including `0` and `false`.
pub fn build_query(filter: &Filter) -> String {
    if filter.is_empty() {
        return String::new();
    }
    let segments: Vec<String> = filter
        .iter()
        .map(|(field, value)| match value {
            FilterValue::Eq(value) => format!("{field}={value}"),
            FilterValue::Compare { value, mode } => format!("{field}.{mode}={value}"),
        })
        .collect();
    format!("?{}", segments.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_builds_empty_query() {
        assert_eq!(build_query(&Filter::new()), "");
        assert_eq!(build_query(&normalize_filter(None)), "");
    }

    #[test]
    fn test_scalar_and_compare_segments() {
        let filter = Filter::new()
            .compare("created_at", "gte", "2021-01-27T13:58:02.977Z")
            .equal("limit", 20);
        assert_eq!(
            build_query(&filter),
            "?created_at.gte=2021-01-27T13:58:02.977Z&limit=20"
        );
    }

    #[test]
    fn test_insertion_order_preserved() {
        let filter = Filter::new()
            .equal("status", "succeeded")
            .lte("created_at", "2021-02-01")
            .equal("payment_method", "bank_card");
        let query = build_query(&filter);
        assert!(query.starts_with('?'));
        let segments: Vec<&str> = query[1..].split('&').collect();
        assert_eq!(
            segments,
            vec![
                "status=succeeded",
                "created_at.lte=2021-02-01",
                "payment_method=bank_card"
            ]
        );
    }

    #[test]
    fn test_falsy_values_are_emitted() {
        let filter = Filter::new().equal("limit", 0).equal("paid", false);
        assert_eq!(build_query(&filter), "?limit=0&paid=false");
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let filter = Filter::new().equal("a", 1).equal("b", 2).equal("a", 3);
        assert_eq!(build_query(&filter), "?a=3&b=2");
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn test_normalize_returns_independent_copy() {
        let original = Filter::new().equal("limit", 10);
        let mut copy = normalize_filter(Some(&original));
        copy.insert("status", FilterValue::Eq("pending".into()));
        copy.insert("limit", FilterValue::Eq("50".into()));

        assert_eq!(original.len(), 1);
        assert_eq!(original.get("limit"), Some(&FilterValue::Eq("10".into())));
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(FilterMode::from("gte"), FilterMode::Gte);
        assert_eq!(FilterMode::from("lt"), FilterMode::Lt);
        assert_eq!(
            FilterMode::from("neq"),
            FilterMode::Other("neq".to_string())
        );
        assert_eq!(FilterMode::Other("neq".into()).as_str(), "neq");
    }

    #[test]
    fn test_cursor_and_limit_helpers() {
        let filter = Filter::new().limit(5).cursor("37a5c87d-3984-51e8-a7f3-8de646d39ec15");
        assert_eq!(
            build_query(&filter),
            "?limit=5&cursor=37a5c87d-3984-51e8-a7f3-8de646d39ec15"
        );
    }
}
