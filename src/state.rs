use std::sync::Arc;

use crate::services::{FacetIndex, RecordStore, index_facets};
use crate::session::{SessionManager, SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub records: RecordStore,
    pub facets: Arc<FacetIndex>,
    pub sessions: SessionManager,
}

impl AppState {
    pub fn new(records: RecordStore, store: Arc<dyn SessionStore>) -> Self {
        let facets = Arc::new(index_facets(records.records()));
        Self {
            records,
            facets,
            sessions: SessionManager::new(store),
        }
    }
}
