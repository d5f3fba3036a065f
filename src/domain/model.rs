use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One laureate entry exactly as the API returned it.
pub type RawRecord = Map<String, Value>;

/// Placeholder for top-level fields missing from the source.
pub const UNKNOWN: &str = "Unknown";

/// The API pages by offset in fixed steps.
pub const PAGE_SIZE: usize = 50;

pub const ORGANIZATION_MARKER: &str = "orgName";
pub const PRIZES_FIELD: &str = "nobelPrizes";
pub const GENDER_FIELD: &str = "gender";
pub const EMAIL_FIELD: &str = "email";

/// How a single top-level field is reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Verbatim,
    /// Take `field[key]` when the field is an object holding `key`.
    SubKey(&'static str),
    /// A list of prize entries trimmed to the given sub-fields.
    Prizes(&'static [&'static str]),
}

pub const PRIZE_FIELDS: &[&str] = &["awardYear", "category", "prizeStatus", "motivation"];

pub const REQUIRED_FIELDS: &[(&str, FieldRule)] = &[
    ("givenName", FieldRule::SubKey("en")),
    ("familyName", FieldRule::SubKey("en")),
    (GENDER_FIELD, FieldRule::Verbatim),
    ("birth", FieldRule::SubKey("date")),
    ("wikipedia", FieldRule::SubKey("english")),
    (PRIZES_FIELD, FieldRule::Prizes(PRIZE_FIELDS)),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedPrize {
    pub data: Map<String, Value>,
}

/// A laureate reduced to [`REQUIRED_FIELDS`], keys kept in that order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedRecord {
    pub data: Map<String, Value>,
}

impl ExtractedRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn is_unknown(&self, key: &str) -> bool {
        matches!(self.data.get(key), Some(Value::String(s)) if s == UNKNOWN)
    }
}

/// Query sent with every page request: the running offset plus source filters
/// such as `nobelPrizeYear` and `yearTo`, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub offset: usize,
    #[serde(flatten)]
    pub filters: Map<String, Value>,
}

impl PageQuery {
    pub fn new(offset: usize) -> Self {
        Self {
            offset,
            filters: Map::new(),
        }
    }

    pub fn with_filter(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.filters.insert(key.to_string(), value.into());
        self
    }

    pub fn advance(&mut self) {
        self.offset += PAGE_SIZE;
    }

    pub fn filter_text(&self, key: &str) -> Option<String> {
        self.filters.get(key).map(value_text)
    }

    /// Offset first, then filters as plain strings.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.filters.len() + 1);
        pairs.push(("offset".to_string(), self.offset.to_string()));
        for (key, value) in &self.filters {
            pairs.push((key.clone(), value_text(value)));
        }
        pairs
    }
}

/// Display form of a JSON value for query strings and spreadsheet cells.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_pairs_put_offset_first() {
        let query = PageQuery::new(100)
            .with_filter("nobelPrizeYear", 1901)
            .with_filter("yearTo", "2023");

        assert_eq!(
            query.query_pairs(),
            vec![
                ("offset".to_string(), "100".to_string()),
                ("nobelPrizeYear".to_string(), "1901".to_string()),
                ("yearTo".to_string(), "2023".to_string()),
            ]
        );
    }

    #[test]
    fn test_advance_moves_by_page_size() {
        let mut query = PageQuery::new(0);
        query.advance();
        query.advance();
        assert_eq!(query.offset, 2 * PAGE_SIZE);
    }

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&json!("Physics")), "Physics");
        assert_eq!(value_text(&json!(1901)), "1901");
        assert_eq!(value_text(&json!(null)), "");
        assert_eq!(value_text(&json!({"en": "x"})), r#"{"en":"x"}"#);
    }
}
