use crate::domain::model::{
    ExtractedPrize, ExtractedRecord, FieldRule, RawRecord, EMAIL_FIELD, ORGANIZATION_MARKER,
    PRIZE_FIELDS, REQUIRED_FIELDS, UNKNOWN,
};
use serde_json::{Map, Value};

/// Reduces every person record to [`REQUIRED_FIELDS`]. Organizations are dropped.
pub fn extract_laureates(raw: &[RawRecord]) -> Vec<ExtractedRecord> {
    let mut extracted = Vec::with_capacity(raw.len());

    for laureate in raw {
        if let Some(org) = laureate.get(ORGANIZATION_MARKER) {
            let name = org
                .get("en")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| org.to_string());
            tracing::debug!("Skipping organization data: {}", name);
            continue;
        }

        extracted.push(extract_one(laureate));
    }

    tracing::info!(
        "Extracted {} laureates from {} raw records",
        extracted.len(),
        raw.len()
    );
    extracted
}

fn extract_one(laureate: &RawRecord) -> ExtractedRecord {
    let mut data = Map::new();

    for (field, rule) in REQUIRED_FIELDS {
        let value = match laureate.get(*field) {
            None => Value::String(UNKNOWN.to_string()),
            Some(value) => apply_rule(value, *rule),
        };
        data.insert((*field).to_string(), value);
    }

    ExtractedRecord { data }
}

fn apply_rule(value: &Value, rule: FieldRule) -> Value {
    match rule {
        FieldRule::Verbatim => value.clone(),
        FieldRule::SubKey(key) => value.get(key).unwrap_or(value).clone(),
        FieldRule::Prizes(_) => match value {
            Value::Array(entries) => Value::Array(
                trim_prizes(entries)
                    .into_iter()
                    .map(|prize| Value::Object(prize.data))
                    .collect(),
            ),
            other => other.clone(),
        },
    }
}

/// Keeps only [`PRIZE_FIELDS`] of each prize, unwrapping `{"en": ..}` values.
/// Absent sub-fields stay absent.
pub fn trim_prizes(prizes: &[Value]) -> Vec<ExtractedPrize> {
    prizes
        .iter()
        .map(|prize| {
            let mut data = Map::new();
            let Some(entry) = prize.as_object() else {
                tracing::warn!("Prize entry is not an object: {}", prize);
                return ExtractedPrize { data };
            };

            for field in PRIZE_FIELDS {
                if let Some(value) = entry.get(*field) {
                    let value = value.get("en").unwrap_or(value);
                    data.insert((*field).to_string(), value.clone());
                }
            }
            ExtractedPrize { data }
        })
        .collect()
}

/// Appends a synthetic `email` built from the given and family names.
/// Records with a missing or non-string name are left alone.
pub fn augment_with_email(records: &[ExtractedRecord], suffix: &str) -> Vec<ExtractedRecord> {
    records
        .iter()
        .map(|record| {
            let mut augmented = record.clone();
            if let Some(email) = derive_email(record, suffix) {
                augmented
                    .data
                    .insert(EMAIL_FIELD.to_string(), Value::String(email));
            }
            augmented
        })
        .collect()
}

fn derive_email(record: &ExtractedRecord, suffix: &str) -> Option<String> {
    let name_part = |key: &str| -> Option<String> {
        if record.is_unknown(key) {
            return None;
        }
        let name = record.get(key)?.as_str()?.trim();
        if name.is_empty() {
            return None;
        }
        Some(name.split_whitespace().collect::<Vec<_>>().join("_"))
    };

    let given = name_part("givenName")?;
    let family = name_part("familyName")?;
    Some(format!("{}.{}@{}", given, family, suffix).to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PRIZES_FIELD;
    use serde_json::json;

    fn raw(value: Value) -> RawRecord {
        value.as_object().cloned().unwrap()
    }

    fn curie() -> RawRecord {
        raw(json!({
            "id": "6",
            "givenName": {"en": "Marie", "se": "Marie"},
            "familyName": {"en": "Curie"},
            "gender": "female",
            "birth": {"date": "1867-11-07", "place": {"city": {"en": "Warsaw"}}},
            "wikipedia": {"slug": "Marie_Curie", "english": "https://en.wikipedia.org/wiki/Marie_Curie"},
            "nobelPrizes": [
                {
                    "awardYear": "1903",
                    "category": {"en": "Physics", "se": "Fysik"},
                    "prizeStatus": "received",
                    "motivation": {"en": "in recognition of the extraordinary services"},
                    "prizeAmount": 50000
                }
            ]
        }))
    }

    fn red_cross() -> RawRecord {
        raw(json!({
            "id": "482",
            "orgName": {"en": "International Committee of the Red Cross"},
            "nobelPrizes": [{"awardYear": "1917", "category": {"en": "Peace"}}]
        }))
    }

    #[test]
    fn test_extracts_required_fields_in_order() {
        let records = extract_laureates(&[curie()]);

        assert_eq!(records.len(), 1);
        let keys: Vec<_> = records[0].data.keys().cloned().collect();
        assert_eq!(
            keys,
            vec!["givenName", "familyName", "gender", "birth", "wikipedia", "nobelPrizes"]
        );
        assert_eq!(records[0].get("givenName"), Some(&json!("Marie")));
        assert_eq!(records[0].get("birth"), Some(&json!("1867-11-07")));
        assert_eq!(
            records[0].get("wikipedia"),
            Some(&json!("https://en.wikipedia.org/wiki/Marie_Curie"))
        );
        assert_eq!(
            records[0].get(PRIZES_FIELD),
            Some(&json!([{
                "awardYear": "1903",
                "category": "Physics",
                "prizeStatus": "received",
                "motivation": "in recognition of the extraordinary services"
            }]))
        );
    }

    #[test]
    fn test_missing_fields_become_unknown() {
        let records = extract_laureates(&[raw(json!({"id": "1", "givenName": {"en": "Ada"}}))]);

        let record = &records[0];
        assert_eq!(record.get("givenName"), Some(&json!("Ada")));
        for field in ["familyName", "gender", "birth", "wikipedia", "nobelPrizes"] {
            assert!(record.is_unknown(field), "{} should be Unknown", field);
        }
    }

    #[test]
    fn test_sub_key_falls_back_to_verbatim() {
        let records = extract_laureates(&[raw(json!({
            "givenName": "Plain",
            "birth": {"year": "1900"}
        }))]);

        assert_eq!(records[0].get("givenName"), Some(&json!("Plain")));
        assert_eq!(records[0].get("birth"), Some(&json!({"year": "1900"})));
    }

    #[test]
    fn test_organizations_are_excluded() {
        let input = vec![curie(), red_cross(), curie(), red_cross()];

        let records = extract_laureates(&input);

        assert_eq!(records.len(), input.len() - 2);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let input = vec![curie(), red_cross(), raw(json!({"gender": "male"}))];

        let first = serde_json::to_vec(&extract_laureates(&input)).unwrap();
        let second = serde_json::to_vec(&extract_laureates(&input)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_trim_prizes_unwraps_english_and_omits_absent() {
        let prizes = vec![json!({
            "motivation": {"en": "for the discovery", "se": "för upptäckten"},
            "category": "Chemistry",
            "dateAwarded": "1911-12-10"
        })];

        let trimmed = trim_prizes(&prizes);

        assert_eq!(trimmed.len(), 1);
        assert_eq!(
            serde_json::to_value(&trimmed[0]).unwrap(),
            json!({"category": "Chemistry", "motivation": "for the discovery"})
        );
        assert!(!trimmed[0].data.contains_key("awardYear"));
        assert!(!trimmed[0].data.contains_key("prizeStatus"));
    }

    #[test]
    fn test_trim_prizes_keeps_count_for_malformed_entries() {
        let trimmed = trim_prizes(&[json!("oops"), json!({"awardYear": "2001"})]);

        assert_eq!(trimmed.len(), 2);
        assert!(trimmed[0].data.is_empty());
        assert_eq!(trimmed[1].data.get("awardYear"), Some(&json!("2001")));
    }

    #[test]
    fn test_augment_with_email() {
        let records = extract_laureates(&[
            curie(),
            raw(json!({"givenName": {"en": "Jean Baptiste"}, "familyName": {"en": "Perrin"}})),
            raw(json!({"givenName": {"en": "Nameless"}})),
        ]);

        let augmented = augment_with_email(&records, "nobel.org");

        assert_eq!(augmented[0].get("email"), Some(&json!("marie.curie@nobel.org")));
        assert_eq!(
            augmented[1].get("email"),
            Some(&json!("jean_baptiste.perrin@nobel.org"))
        );
        assert_eq!(augmented[2].get("email"), None);
        assert_eq!(records[0].get("email"), None);
    }
}
