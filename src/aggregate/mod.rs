pub mod grouping;
pub mod insights;
pub mod totals;

pub use grouping::group_by_listing;
pub use insights::{compute_insights, compute_recent_trend};
pub use totals::build_totals;
