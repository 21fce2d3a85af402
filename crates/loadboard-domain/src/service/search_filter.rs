//! Search filter contract for the load table
//!
//! - `status`: exact, case-sensitive, defaults to "available"
//! - `origin` / `destination`: case-insensitive substring containment
//! - `equipment`: exact, case-sensitive
//! - `limit`: caps the row count after ordering by creation time (newest first)
//!
//! Empty strings are treated the same as an absent filter.

use loadboard_types::ValidationError;

use crate::model::DEFAULT_STATUS;

pub const DEFAULT_SEARCH_LIMIT: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub equipment: Option<String>,
    pub status: String,
    pub limit: u32,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            origin: None,
            destination: None,
            equipment: None,
            status: DEFAULT_STATUS.to_string(),
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl SearchFilter {
    pub fn with_origin(mut self, origin: Option<impl Into<String>>) -> Self {
        self.origin = non_empty(origin);
        self
    }

    pub fn with_destination(mut self, destination: Option<impl Into<String>>) -> Self {
        self.destination = non_empty(destination);
        self
    }

    pub fn with_equipment(mut self, equipment: Option<impl Into<String>>) -> Self {
        self.equipment = non_empty(equipment);
        self
    }

    pub fn with_status(mut self, status: Option<impl Into<String>>) -> Self {
        self.status = non_empty(status).unwrap_or_else(|| DEFAULT_STATUS.to_string());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

fn non_empty(value: Option<impl Into<String>>) -> Option<String> {
    value.map(Into::into).filter(|v| !v.is_empty())
}

/// Case folding used for substring filters, both in process and in the store
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

/// Case-insensitive substring containment
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    fold_case(haystack).contains(&fold_case(needle))
}

/// Parse a `limit` query value. Absent or empty values fall back to `default`.
pub fn parse_limit(raw: Option<&str>, default: u32) -> Result<u32, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse::<u32>()
            .map_err(|_| ValidationError::InvalidLimit(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let filter = SearchFilter::default();
        assert_eq!(filter.status, "available");
        assert_eq!(filter.limit, 50);
        assert!(filter.origin.is_none());
    }

    #[test]
    fn test_empty_values_are_absent() {
        let filter = SearchFilter::default()
            .with_origin(Some(""))
            .with_equipment(Some(""))
            .with_status(Some(""));
        assert!(filter.origin.is_none());
        assert!(filter.equipment.is_none());
        assert_eq!(filter.status, "available");
    }

    #[test]
    fn test_status_override() {
        let filter = SearchFilter::default().with_status(Some("booked"));
        assert_eq!(filter.status, "booked");
    }

    #[test]
    fn test_contains_folded() {
        assert!(contains_folded("Los Angeles, CA", "los angeles"));
        assert!(contains_folded("Los Angeles, CA", "ANGELES"));
        assert!(contains_folded("MÜNCHEN", "münchen"));
        assert!(!contains_folded("Phoenix, AZ", "los"));
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(None, 50), Ok(50));
        assert_eq!(parse_limit(Some(""), 50), Ok(50));
        assert_eq!(parse_limit(Some("10"), 50), Ok(10));
        assert_eq!(parse_limit(Some("0"), 50), Ok(0));
        assert_eq!(
            parse_limit(Some("-1"), 50),
            Err(ValidationError::InvalidLimit("-1".to_string()))
        );
        assert!(parse_limit(Some("ten"), 50).is_err());
    }
}
