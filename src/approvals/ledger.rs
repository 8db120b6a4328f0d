use crate::domain::Review;
use crate::errors::ServerError;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Operator approval decisions, keyed by review id.
///
/// `get_approval` tells "never decided" (`None`) apart from an explicit
/// `Some(false)`; `is_approved` folds both into `false`.
pub trait ApprovalLedger: Send + Sync {
    fn approve(&self, review_id: &str) -> Result<(), ServerError> {
        self.set(review_id, true)
    }

    fn unapprove(&self, review_id: &str) -> Result<(), ServerError> {
        self.set(review_id, false)
    }

    fn set(&self, review_id: &str, approved: bool) -> Result<(), ServerError>;

    fn get_approval(&self, review_id: &str) -> Result<Option<bool>, ServerError>;

    fn is_approved(&self, review_id: &str) -> Result<bool, ServerError> {
        Ok(self.get_approval(review_id)?.unwrap_or(false))
    }

    fn get_all(&self) -> Result<BTreeMap<String, bool>, ServerError>;
}

/// Process-local ledger. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    entries: Mutex<BTreeMap<String, bool>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, bool>>, ServerError> {
        self.entries.lock().map_err(|_| ServerError::InternalError)
    }
}

impl ApprovalLedger for InMemoryLedger {
    fn set(&self, review_id: &str, approved: bool) -> Result<(), ServerError> {
        self.lock()?.insert(review_id.to_string(), approved);
        Ok(())
    }

    fn get_approval(&self, review_id: &str) -> Result<Option<bool>, ServerError> {
        Ok(self.lock()?.get(review_id).copied())
    }

    fn get_all(&self) -> Result<BTreeMap<String, bool>, ServerError> {
        Ok(self.lock()?.clone())
    }
}

/// Overlays ledger decisions onto freshly normalized reviews.
/// Reviews without a decision keep `approved = false`.
pub fn apply_approvals(reviews: &mut [Review], ledger: &dyn ApprovalLedger) -> Result<(), ServerError> {
    let decisions = ledger.get_all()?;
    for review in reviews.iter_mut() {
        review.approved = decisions.get(&review.id).copied().unwrap_or(false);
    }
    Ok(())
}
