pub mod ledger;
pub mod sqlite;

pub use ledger::{apply_approvals, ApprovalLedger, InMemoryLedger};
pub use sqlite::SqliteLedger;
