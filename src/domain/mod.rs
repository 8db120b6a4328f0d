pub mod listing;
pub mod review;
pub mod slug;

pub use listing::{ListingInsights, ListingReviews, Totals, Trend};
pub use review::{Channel, Review, ReviewStatus};
pub use slug::slugify;
