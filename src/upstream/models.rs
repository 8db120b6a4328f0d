use crate::upstream::lenient;
use serde::Deserialize;

// HostawayReview
//  ├── id                 (int or string)
//  ├── type / status
//  ├── rating             (0-10 or null)
//  ├── publicReview
//  ├── reviewCategory[]
//  │    ├── category
//  │    └── rating        (0-10)
//  ├── submittedAt        ("2020-08-21 22:45:14" or RFC 3339)
//  ├── guestName
//  ├── listingName
//  └── channel            (optional)

/// One review record as the property-management provider returns it.
/// Every field is optional; the adapter decides the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostawayReview {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient::opt_string")]
    pub review_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub public_review: Option<String>,
    #[serde(default, deserialize_with = "lenient::vec_or_empty")]
    pub review_category: Vec<HostawayCategory>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub submitted_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub guest_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub listing_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub channel: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostawayCategory {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub rating: Option<f64>,
}

/// One review from the places provider (1-5 stars, Unix seconds).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceReview {
    #[serde(default, alias = "author_name", deserialize_with = "lenient::opt_string")]
    pub reviewer_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub time: Option<i64>,
}

/// A place id/name pair resolved from a free-text query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceMatch {
    pub place_id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct FindPlaceResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub candidates: Vec<PlaceCandidate>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceCandidate {
    pub place_id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceDetailsResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub result: Option<PlaceDetails>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::vec_or_empty")]
    pub reviews: Vec<PlaceReview>,
}
