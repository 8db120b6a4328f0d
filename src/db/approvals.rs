// src/db/approvals.rs
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;

/// Last write wins.
pub fn upsert_approval(
    conn: &Connection,
    review_id: &str,
    approved: bool,
    now: i64,
) -> Result<(), ServerError> {
    conn.execute(
        r#"
        insert into review_approvals (review_id, approved, updated_at)
        values (?1, ?2, ?3)
        on conflict(review_id) do update set
            approved = excluded.approved,
            updated_at = excluded.updated_at
        "#,
        params![review_id, approved, now],
    )
    .map_err(|e| ServerError::DbError(format!("failed to save approval: {e}")))?;
    Ok(())
}

pub fn get_approval(conn: &Connection, review_id: &str) -> Result<Option<bool>, ServerError> {
    conn.query_row(
        "select approved from review_approvals where review_id = ?",
        params![review_id],
        |row| row.get::<_, bool>(0),
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("failed to load approval: {e}")))
}

pub fn list_approvals(conn: &Connection) -> Result<BTreeMap<String, bool>, ServerError> {
    let mut stmt = conn
        .prepare("select review_id, approved from review_approvals")
        .map_err(|e| ServerError::DbError(format!("Prepare failed: {e}")))?;

    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, bool>(1)?)))
        .map_err(|e| ServerError::DbError(format!("Query failed: {e}")))?;

    rows.collect::<Result<BTreeMap<_, _>, _>>()
        .map_err(|e| ServerError::DbError(format!("Row read failed: {e}")))
}
