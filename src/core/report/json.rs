use crate::domain::model::ExtractedRecord;
use crate::utils::error::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Pretty JSON with a four space indent. Non-ASCII text is written as-is.
pub fn render_json(records: &[ExtractedRecord]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    records.serialize(&mut serializer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extractor::extract_laureates;
    use serde_json::json;

    fn sample_records() -> Vec<ExtractedRecord> {
        let raw = vec![
            json!({
                "givenName": {"en": "Selma"},
                "familyName": {"en": "Lagerlöf"},
                "gender": "female",
                "birth": {"date": "1858-11-20"},
                "nobelPrizes": [{"awardYear": "1909", "category": {"en": "Literature"}}]
            }),
            json!({"givenName": {"en": "Ивáн"}, "familyName": {"en": "Бунин"}}),
        ];
        let raw: Vec<_> = raw
            .into_iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect();
        extract_laureates(&raw)
    }

    #[test]
    fn test_json_round_trip() {
        let records = sample_records();

        let bytes = render_json(&records).unwrap();
        let parsed: Vec<ExtractedRecord> = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(parsed, records);
    }

    #[test]
    fn test_json_is_indented_and_keeps_unicode() {
        let bytes = render_json(&sample_records()).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("Lagerlöf"));
        assert!(text.contains("Бунин"));
        assert!(!text.contains("\\u"));
        assert!(text.contains("\n        \"givenName\": \"Selma\""));
    }

    #[test]
    fn test_json_keeps_field_order() {
        let text = String::from_utf8(render_json(&sample_records()).unwrap()).unwrap();

        let given = text.find("givenName").unwrap();
        let gender = text.find("gender").unwrap();
        let prizes = text.find("nobelPrizes").unwrap();
        assert!(given < gender && gender < prizes);
    }
}
