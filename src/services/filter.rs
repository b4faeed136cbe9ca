use crate::models::{FilterCriteria, IndexedRecord, Record};

/// Lower-cases and strips every whitespace character.
pub fn normalize_course(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns the records matching every clause of `criteria`, in store order.
pub fn apply(records: &[IndexedRecord], criteria: &FilterCriteria) -> Vec<IndexedRecord> {
    let query = normalize_course(&criteria.course_query);
    records
        .iter()
        .filter(|r| matches_normalized(&r.record, criteria, &query))
        .cloned()
        .collect()
}

pub fn matches(record: &Record, criteria: &FilterCriteria) -> bool {
    matches_normalized(record, criteria, &normalize_course(&criteria.course_query))
}

fn matches_normalized(record: &Record, criteria: &FilterCriteria, query: &str) -> bool {
    course_matches(record.home_course.as_deref(), query)
        && facet_matches(record.department.as_deref(), &criteria.department)
        && facet_matches(record.foreign_institution.as_deref(), &criteria.university)
        && facet_matches(record.country.as_deref(), &criteria.country)
}

fn course_matches(course: Option<&str>, query: &str) -> bool {
    query.is_empty() || normalize_course(course.unwrap_or_default()).contains(query)
}

fn facet_matches(value: Option<&str>, wanted: &str) -> bool {
    wanted.is_empty() || value == Some(wanted)
}
