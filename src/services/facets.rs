use std::collections::HashSet;

use serde::Serialize;

use crate::models::{IndexedRecord, Record};
use crate::services::collation::locale_cmp;

/// Selectable values for each filterable attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetIndex {
    pub institutions: Vec<String>,
    pub departments: Vec<String>,
    pub countries: Vec<String>,
}

/// Collects the distinct, trimmed, non-blank values of every facet, sorted
/// in locale order. Recomputed from scratch on each call.
pub fn index_facets(records: &[IndexedRecord]) -> FacetIndex {
    FacetIndex {
        institutions: distinct_sorted(records, |r| r.foreign_institution.as_deref()),
        departments: distinct_sorted(records, |r| r.department.as_deref()),
        countries: distinct_sorted(records, |r| r.country.as_deref()),
    }
}

fn distinct_sorted<F>(records: &[IndexedRecord], attribute: F) -> Vec<String>
where
    F: Fn(&Record) -> Option<&str>,
{
    let mut seen = HashSet::new();
    let mut values: Vec<String> = records
        .iter()
        .filter_map(|r| attribute(&r.record))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect();
    values.sort_by(|a, b| locale_cmp(a, b));
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::RecordStore;

    fn with_country(country: Option<&str>) -> Record {
        Record {
            country: country.map(str::to_string),
            ..Record::default()
        }
    }

    #[test]
    fn test_blank_values_are_dropped_and_duplicates_merged() {
        let store = RecordStore::new(vec![
            with_country(Some("X")),
            with_country(Some(" X ")),
            with_country(Some("")),
            with_country(Some("  ")),
            with_country(None),
        ]);

        let facets = index_facets(store.records());
        assert_eq!(facets.countries, vec!["X"]);
        assert!(facets.departments.is_empty());
        assert!(facets.institutions.is_empty());
    }

    #[test]
    fn test_each_facet_reads_its_own_attribute() {
        let store = RecordStore::new(vec![
            Record {
                department: Some("Mechanical".to_string()),
                foreign_institution: Some("TU Delft".to_string()),
                country: Some("Netherlands".to_string()),
                ..Record::default()
            },
            Record {
                department: Some("Aerospace".to_string()),
                foreign_institution: Some("Universidad Politécnica de Madrid".to_string()),
                country: Some("Spain".to_string()),
                ..Record::default()
            },
        ]);

        let facets = index_facets(store.records());
        assert_eq!(facets.departments, vec!["Aerospace", "Mechanical"]);
        assert_eq!(facets.institutions, vec!["TU Delft", "Universidad Politécnica de Madrid"]);
        assert_eq!(facets.countries, vec!["Netherlands", "Spain"]);
    }

    #[test]
    fn test_sorting_is_locale_aware_and_idempotent() {
        let store = RecordStore::new(vec![
            with_country(Some("Zurich")),
            with_country(Some("Ankara")),
            with_country(Some("Ávila")),
        ]);

        let first = index_facets(store.records());
        assert_eq!(first.countries, vec!["Ankara", "Ávila", "Zurich"]);
        assert_eq!(index_facets(store.records()), first);
    }

    #[test]
    fn test_empty_store_yields_empty_facets() {
        assert_eq!(index_facets(RecordStore::empty().records()), FacetIndex::default());
    }
}
