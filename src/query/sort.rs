use crate::domain::Review;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    #[default]
    Date,
    Rating,
}

impl SortBy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "date" => Some(SortBy::Date),
            "rating" => Some(SortBy::Rating),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// Returns a newly ordered copy. Stable: equal keys keep their input order
/// in both directions.
pub fn sort_reviews(reviews: &[Review], by: SortBy, order: SortOrder) -> Vec<Review> {
    let mut sorted = reviews.to_vec();
    sorted.sort_by(|a, b| {
        let ord = match by {
            SortBy::Date => a.submitted_at.cmp(&b.submitted_at),
            SortBy::Rating => a.rating.total_cmp(&b.rating),
        };
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    sorted
}
