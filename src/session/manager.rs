use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::models::{FilterCriteria, IndexedRecord};

use super::{FILTERS_KEY, RESULTS_KEY, SELECTION_KEY, SessionId, SessionStore};

/// What a list view finds in the session when it loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Restored {
    pub criteria: Option<FilterCriteria>,
    pub results: Option<Vec<IndexedRecord>>,
}

/// Persists the last search and the record chosen for detail viewing.
///
/// Reads never fail: a missing, unreadable or corrupt entry is reported as
/// absent so the views fall back to their defaults.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Overwrites the last criteria and results together.
    pub async fn persist(
        &self,
        session: &SessionId,
        criteria: &FilterCriteria,
        results: &[IndexedRecord],
    ) -> Result<(), AppError> {
        let entries = vec![
            (FILTERS_KEY, serde_json::to_string(criteria)?),
            (RESULTS_KEY, serde_json::to_string(results)?),
        ];
        self.store.put_many(session, entries).await?;
        debug!("session {} persisted {} results", session, results.len());
        Ok(())
    }

    /// Removes the last criteria and results. Absence differs from an empty search.
    pub async fn clear(&self, session: &SessionId) -> Result<(), AppError> {
        self.store.remove_many(session, &[FILTERS_KEY, RESULTS_KEY]).await
    }

    pub async fn restore(&self, session: &SessionId) -> Restored {
        Restored {
            criteria: self.read(session, FILTERS_KEY).await,
            results: self.read(session, RESULTS_KEY).await,
        }
    }

    pub async fn select_for_detail(&self, session: &SessionId, record: &IndexedRecord) -> Result<(), AppError> {
        let entries = vec![(SELECTION_KEY, serde_json::to_string(record)?)];
        self.store.put_many(session, entries).await
    }

    /// The last selected record. Never cleared once read.
    pub async fn read_selection(&self, session: &SessionId) -> Option<IndexedRecord> {
        self.read(session, SELECTION_KEY).await
    }

    async fn read<T: DeserializeOwned>(&self, session: &SessionId, key: &str) -> Option<T> {
        let raw = match self.store.get(session, key).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("failed to read session entry {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str::<Option<T>>(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("discarding corrupt session entry {}: {}", key, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::models::Record;
    use crate::session::{MemorySessionStore, SqliteSessionStore};

    fn manager() -> (SessionManager, Arc<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::new());
        (SessionManager::new(store.clone()), store)
    }

    fn results() -> Vec<IndexedRecord> {
        vec![
            IndexedRecord {
                position: 0,
                record: Record {
                    home_course: Some("CS 101".to_string()),
                    department: Some("CSE".to_string()),
                    home_credits: Some("6".to_string()),
                    ..Record::default()
                },
            },
            IndexedRecord {
                position: 7,
                record: Record::default(),
            },
        ]
    }

    fn criteria() -> FilterCriteria {
        FilterCriteria {
            course_query: "cs".to_string(),
            department: "CSE".to_string(),
            ..FilterCriteria::default()
        }
    }

    #[tokio::test]
    async fn test_persist_then_restore_round_trips() {
        let (manager, _) = manager();
        let session = SessionId::generate();

        manager.persist(&session, &criteria(), &results()).await.expect("persist");

        let restored = manager.restore(&session).await;
        assert_eq!(restored.criteria, Some(criteria()));
        assert_eq!(restored.results, Some(results()));
    }

    #[tokio::test]
    async fn test_empty_search_is_not_absence() {
        let (manager, _) = manager();
        let session = SessionId::generate();

        manager.persist(&session, &FilterCriteria::default(), &[]).await.expect("persist");
        let restored = manager.restore(&session).await;
        assert_eq!(restored.criteria, Some(FilterCriteria::default()));
        assert_eq!(restored.results, Some(Vec::new()));

        manager.clear(&session).await.expect("clear");
        assert_eq!(manager.restore(&session).await, Restored::default());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let (manager, _) = manager();
        let mine = SessionId::generate();
        let theirs = SessionId::generate();

        manager.persist(&mine, &criteria(), &results()).await.expect("persist");
        assert_eq!(manager.restore(&theirs).await, Restored::default());
        assert!(manager.read_selection(&theirs).await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_entries_read_as_absent() {
        let (manager, store) = manager();
        let session = SessionId::generate();

        store.insert_raw(&session, FILTERS_KEY, "{not json", Utc::now()).await;
        store.insert_raw(&session, RESULTS_KEY, "null", Utc::now()).await;
        store.insert_raw(&session, SELECTION_KEY, "[1,2,3]", Utc::now()).await;

        assert_eq!(manager.restore(&session).await, Restored::default());
        assert!(manager.read_selection(&session).await.is_none());
    }

    #[tokio::test]
    async fn test_selection_survives_reads_and_searches() {
        let (manager, _) = manager();
        let session = SessionId::generate();
        let picked = results().remove(1);

        manager.select_for_detail(&session, &picked).await.expect("select");
        assert_eq!(manager.read_selection(&session).await, Some(picked.clone()));
        // a second read still sees the same record
        assert_eq!(manager.read_selection(&session).await, Some(picked.clone()));

        manager.clear(&session).await.expect("clear");
        assert_eq!(manager.read_selection(&session).await, Some(picked));
    }

    #[tokio::test]
    async fn test_round_trip_through_sqlite() {
        let pool = crate::db::connect_in_memory().await.expect("Failed to create test db");
        let manager = SessionManager::new(Arc::new(SqliteSessionStore::new(pool)));
        let session = SessionId::generate();

        manager.persist(&session, &criteria(), &results()).await.expect("persist");
        let restored = manager.restore(&session).await;
        assert_eq!(restored.results, Some(results()));

        manager.clear(&session).await.expect("clear");
        assert_eq!(manager.restore(&session).await, Restored::default());
    }
}
