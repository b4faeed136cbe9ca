pub mod manager;

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::repository;
use crate::error::AppError;

pub use manager::{Restored, SessionManager};

pub const FILTERS_KEY: &str = "filters";
pub const RESULTS_KEY: &str = "filteredResults";
pub const SELECTION_KEY: &str = "selectedMapping";

/// Opaque identifier of one browsing session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Accepts only well-formed UUIDs, so arbitrary cookie values never reach storage.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(|id| Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key-value persistence scoped to a session. Values are serialized JSON.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session: &SessionId, key: &str) -> Result<Option<String>, AppError>;

    /// Replaces all given keys at once; on failure none of them change.
    async fn put_many(&self, session: &SessionId, entries: Vec<(&'static str, String)>) -> Result<(), AppError>;

    async fn remove_many(&self, session: &SessionId, keys: &[&'static str]) -> Result<(), AppError>;

    /// Drops every entry last written before `cutoff`, across all sessions.
    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub struct SqliteSessionStore {
    db: SqlitePool,
}

impl SqliteSessionStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn get(&self, session: &SessionId, key: &str) -> Result<Option<String>, AppError> {
        Ok(repository::fetch_entry(&self.db, session.as_str(), key).await?)
    }

    async fn put_many(&self, session: &SessionId, entries: Vec<(&'static str, String)>) -> Result<(), AppError> {
        let now = timestamp(Utc::now());
        repository::upsert_entries(&self.db, session.as_str(), &entries, &now).await?;
        Ok(())
    }

    async fn remove_many(&self, session: &SessionId, keys: &[&'static str]) -> Result<(), AppError> {
        repository::delete_entries(&self.db, session.as_str(), keys).await?;
        Ok(())
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError> {
        Ok(repository::delete_entries_before(&self.db, &timestamp(cutoff)).await?)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("select 1").execute(&self.db).await?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<(String, String), (String, DateTime<Utc>)>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites a raw entry with an explicit write time.
    pub async fn insert_raw(&self, session: &SessionId, key: &str, value: &str, at: DateTime<Utc>) {
        self.entries
            .write()
            .await
            .insert((session.to_string(), key.to_string()), (value.to_string(), at));
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, session: &SessionId, key: &str) -> Result<Option<String>, AppError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(&(session.to_string(), key.to_string()))
            .map(|(value, _)| value.clone()))
    }

    async fn put_many(&self, session: &SessionId, entries: Vec<(&'static str, String)>) -> Result<(), AppError> {
        let now = Utc::now();
        let mut map = self.entries.write().await;
        for (key, value) in entries {
            map.insert((session.to_string(), key.to_string()), (value, now));
        }
        Ok(())
    }

    async fn remove_many(&self, session: &SessionId, keys: &[&'static str]) -> Result<(), AppError> {
        let mut map = self.entries.write().await;
        for key in keys {
            map.remove(&(session.to_string(), key.to_string()));
        }
        Ok(())
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError> {
        let mut map = self.entries.write().await;
        let before = map.len();
        map.retain(|_, (_, at)| *at >= cutoff);
        Ok((before - map.len()) as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
