use std::sync::Arc;

use tracing::{error, info};

use crate::error::LoadError;
use crate::models::{IndexedRecord, Record};
use crate::source::DataSource;

/// The immutable, ordered record set for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Arc<Vec<IndexedRecord>>,
}

impl RecordStore {
    pub fn new(records: Vec<Record>) -> Self {
        let records = records
            .into_iter()
            .enumerate()
            .map(|(position, record)| IndexedRecord { position, record })
            .collect();
        Self {
            records: Arc::new(records),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub async fn load(source: &dyn DataSource) -> Result<Self, LoadError> {
        let records = source.fetch().await?;
        info!("loaded {} mappings from {}", records.len(), source.describe());
        Ok(Self::new(records))
    }

    /// Loads the dataset, falling back to an empty store when the source fails.
    pub async fn load_or_empty(source: &dyn DataSource) -> Self {
        match Self::load(source).await {
            Ok(store) => store,
            Err(e) => {
                error!("Error loading mappings from {}: {}", source.describe(), e);
                Self::empty()
            }
        }
    }

    pub fn records(&self) -> &[IndexedRecord] {
        &self.records
    }

    pub fn get(&self, position: usize) -> Option<&IndexedRecord> {
        self.records.get(position)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{FileDataSource, StaticDataSource};

    fn record(course: &str) -> Record {
        Record {
            home_course: Some(course.to_string()),
            ..Record::default()
        }
    }

    #[tokio::test]
    async fn test_positions_follow_load_order() {
        let source = StaticDataSource::new(vec![record("CS 101"), record("CS 101"), record("EE 201")]);
        let store = RecordStore::load(&source).await.expect("load");

        assert_eq!(store.len(), 3);
        let positions: Vec<usize> = store.records().iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        // identical content, distinct identity
        assert_ne!(store.get(0), store.get(1));
        assert_eq!(store.get(0).map(|r| &r.record), store.get(1).map(|r| &r.record));
        assert!(store.get(3).is_none());
    }

    #[tokio::test]
    async fn test_failed_load_degrades_to_empty_store() {
        let source = FileDataSource::new("/nonexistent/course_mapper/mappings.json");
        let store = RecordStore::load_or_empty(&source).await;
        assert!(store.is_empty());
    }
}
