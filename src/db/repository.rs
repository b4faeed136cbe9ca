use sqlx::SqlitePool;

pub async fn fetch_entry(
    db: &SqlitePool,
    session_id: &str,
    key: &str,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT value FROM session_entries WHERE session_id = ? AND key = ?"
    )
    .bind(session_id)
    .bind(key)
    .fetch_optional(db)
    .await
}

/// Writes all entries in one transaction; either every key is replaced or none is.
pub async fn upsert_entries(
    db: &SqlitePool,
    session_id: &str,
    entries: &[(&str, String)],
    updated_at: &str,
) -> Result<(), sqlx::Error> {
    let mut tx = db.begin().await?;

    for (key, value) in entries {
        sqlx::query(
            r#"
            INSERT INTO session_entries (session_id, key, value, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(session_id, key) DO UPDATE
            SET value = excluded.value,
                updated_at = excluded.updated_at
            "#
        )
        .bind(session_id)
        .bind(*key)
        .bind(value)
        .bind(updated_at)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await
}

pub async fn delete_entries(
    db: &SqlitePool,
    session_id: &str,
    keys: &[&str],
) -> Result<u64, sqlx::Error> {
    let mut tx = db.begin().await?;
    let mut removed = 0;

    for key in keys {
        removed += sqlx::query("DELETE FROM session_entries WHERE session_id = ? AND key = ?")
            .bind(session_id)
            .bind(*key)
            .execute(&mut *tx)
            .await?
            .rows_affected();
    }

    tx.commit().await?;
    Ok(removed)
}

pub async fn delete_entries_before(db: &SqlitePool, cutoff: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM session_entries WHERE updated_at < ?")
        .bind(cutoff)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result)
}
