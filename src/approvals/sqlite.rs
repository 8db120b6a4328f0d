use crate::approvals::ledger::ApprovalLedger;
use crate::db::approvals::{get_approval, list_approvals, upsert_approval};
use crate::db::Database;
use crate::errors::ServerError;
use chrono::Utc;
use std::collections::BTreeMap;

/// Ledger persisted in the `review_approvals` table.
#[derive(Debug, Clone)]
pub struct SqliteLedger {
    db: Database,
}

impl SqliteLedger {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl ApprovalLedger for SqliteLedger {
    fn set(&self, review_id: &str, approved: bool) -> Result<(), ServerError> {
        let now = Utc::now().timestamp();
        self.db
            .with_conn(|conn| upsert_approval(conn, review_id, approved, now))?;
        tracing::info!(review_id, approved, "approval recorded");
        Ok(())
    }

    fn get_approval(&self, review_id: &str) -> Result<Option<bool>, ServerError> {
        self.db.with_conn(|conn| get_approval(conn, review_id))
    }

    fn get_all(&self) -> Result<BTreeMap<String, bool>, ServerError> {
        self.db.with_conn(|conn| list_approvals(conn))
    }
}
