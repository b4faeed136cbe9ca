use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One course-equivalence entry, keyed the way the published dataset names its columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(
        rename = "IITB Course (code-name)",
        default,
        deserialize_with = "text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub home_course: Option<String>,

    #[serde(
        rename = "Department of Student",
        default,
        deserialize_with = "text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub department: Option<String>,

    #[serde(
        rename = "Foreign University Name",
        default,
        deserialize_with = "text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub foreign_institution: Option<String>,

    #[serde(
        rename = "Country",
        default,
        deserialize_with = "text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub country: Option<String>,

    #[serde(
        rename = "Foreign Course (code-name)",
        default,
        deserialize_with = "text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub foreign_course: Option<String>,

    #[serde(
        rename = "IITB Course Descriptions",
        default,
        deserialize_with = "text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub home_description: Option<String>,

    #[serde(
        rename = "Foreign Course Description",
        default,
        deserialize_with = "text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub foreign_description: Option<String>,

    #[serde(
        rename = "IITB Course Credits",
        default,
        deserialize_with = "text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub home_credits: Option<String>,

    #[serde(
        rename = "Credits(Foreign Course)",
        default,
        deserialize_with = "text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub foreign_credits: Option<String>,
}

/// A record paired with its position in load order.
///
/// The position is the record's identity: row activation and the persisted
/// selection address records by it, so two records with identical content
/// stay distinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedRecord {
    pub position: usize,
    #[serde(flatten)]
    pub record: Record,
}

/// Credits show up as both strings and bare numbers in the dataset.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Deserializes a string field that may be `null` or missing as empty.
pub(crate) fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_dataset_entry() {
        let raw = r#"{
            "IITB Course (code-name)": "CS 101 - Computer Programming",
            "Department of Student": "CSE",
            "Foreign University Name": "ETH Zurich",
            "Country": "Switzerland",
            "Foreign Course (code-name)": "252-0027 Einfuhrung in die Programmierung",
            "IITB Course Credits": 6,
            "Credits(Foreign Course)": "7 ECTS",
            "Foreign Course Description": null
        }"#;

        let record: Record = serde_json::from_str(raw).expect("decode record");
        assert_eq!(record.home_course.as_deref(), Some("CS 101 - Computer Programming"));
        assert_eq!(record.home_credits.as_deref(), Some("6"));
        assert_eq!(record.foreign_credits.as_deref(), Some("7 ECTS"));
        assert_eq!(record.foreign_description, None);
        assert_eq!(record.home_description, None);
    }

    #[test]
    fn test_indexed_record_carries_position_next_to_columns() {
        let indexed = IndexedRecord {
            position: 4,
            record: Record {
                department: Some("CSE".to_string()),
                ..Record::default()
            },
        };

        let json = serde_json::to_value(&indexed).expect("encode");
        assert_eq!(json["position"], 4);
        assert_eq!(json["Department of Student"], "CSE");
        assert!(json.get("Country").is_none());

        let back: IndexedRecord = serde_json::from_value(json).expect("decode");
        assert_eq!(back, indexed);
    }

    #[test]
    fn test_unknown_columns_are_ignored() {
        let record: Record =
            serde_json::from_str(r#"{"Country": "Japan", "Remarks": "approved"}"#).expect("decode");
        assert_eq!(record.country.as_deref(), Some("Japan"));
    }
}
