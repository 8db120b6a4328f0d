pub mod fallback;
pub mod hostaway;
pub(crate) mod lenient;
pub mod models;
pub mod place_cache;
pub mod places;
mod source_error;

pub use fallback::{FetchOutcome, SourceKind};
pub use hostaway::HostawayClient;
pub use models::{HostawayReview, PlaceMatch, PlaceReview};
pub use places::{PlaceReviews, PlacesClient};
pub use source_error::SourceError;
