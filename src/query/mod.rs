pub mod filter;
pub mod params;
pub mod sort;

pub use filter::{filter_reviews, FilterOptions};
pub use params::{parse_query, parse_review_query, ReviewQuery};
pub use sort::{sort_reviews, SortBy, SortOrder};
