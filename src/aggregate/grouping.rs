use crate::aggregate::insights::compute_insights;
use crate::domain::review::{mean, round1};
use crate::domain::{Channel, ListingReviews, Review};
use std::collections::{BTreeMap, HashMap};

/// Partition reviews by listing id.
///
/// Groups come out in order of each listing's first appearance; reviews keep
/// their input order within a group. Every input review lands in exactly one
/// group.
pub fn group_by_listing(reviews: &[Review]) -> Vec<ListingReviews> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<Review>> = HashMap::new();

    for review in reviews {
        let key = review.listing_id.as_str();
        groups
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(review.clone());
    }

    order
        .into_iter()
        .filter_map(|key| groups.remove(key))
        .map(build_listing)
        .collect()
}

fn build_listing(reviews: Vec<Review>) -> ListingReviews {
    let listing_id = reviews
        .first()
        .map(|r| r.listing_id.clone())
        .unwrap_or_default();
    let listing_name = reviews
        .first()
        .map(|r| r.listing_name.clone())
        .unwrap_or_default();

    let avg_rating = mean(reviews.iter().map(|r| r.rating))
        .map(round1)
        .unwrap_or(0.0);
    let category_averages = category_averages(&reviews);

    let mut channels: Vec<Channel> = Vec::new();
    for review in &reviews {
        if !channels.contains(&review.channel) {
            channels.push(review.channel);
        }
    }

    let insights = compute_insights(&reviews, &category_averages);

    ListingReviews {
        listing_id,
        listing_name,
        total_reviews: reviews.len(),
        avg_rating,
        category_averages,
        channels,
        reviews,
        insights,
    }
}

/// Mean score per category, each over only the reviews that reported it.
pub fn category_averages(reviews: &[Review]) -> BTreeMap<String, f64> {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for review in reviews {
        for (category, score) in &review.categories {
            let slot = sums.entry(category.as_str()).or_insert((0.0, 0));
            slot.0 += score;
            slot.1 += 1;
        }
    }

    sums.into_iter()
        .map(|(category, (sum, count))| (category.to_string(), sum / count as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::test_support::{review_at, review_for};

    #[test]
    fn groups_in_first_appearance_order() {
        let reviews = vec![
            review_for("b", "Listing B", "1", 4.0),
            review_for("a", "Listing A", "2", 5.0),
            review_for("b", "Listing B (renamed)", "3", 3.0),
        ];

        let listings = group_by_listing(&reviews);
        let ids: Vec<&str> = listings.iter().map(|l| l.listing_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);

        let b = &listings[0];
        assert_eq!(b.listing_name, "Listing B");
        let review_ids: Vec<&str> = b.reviews.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(review_ids, vec!["1", "3"]);
    }

    #[test]
    fn partitions_input_exactly() {
        let reviews: Vec<Review> = (0..17)
            .map(|i| review_for(&format!("l{}", i % 4), "L", &i.to_string(), 3.0))
            .collect();

        let listings = group_by_listing(&reviews);
        let total: usize = listings.iter().map(|l| l.total_reviews).sum();
        assert_eq!(total, reviews.len());

        let mut seen: Vec<String> = listings
            .iter()
            .flat_map(|l| l.reviews.iter().map(|r| r.id.clone()))
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), reviews.len());
    }

    #[test]
    fn avg_rating_is_rounded_mean() {
        let reviews = vec![
            review_for("x", "X", "1", 4.0),
            review_for("x", "X", "2", 5.0),
            review_for("x", "X", "3", 3.0),
        ];
        assert_eq!(group_by_listing(&reviews)[0].avg_rating, 4.0);

        let uneven = vec![
            review_for("y", "Y", "1", 4.5),
            review_for("y", "Y", "2", 4.0),
            review_for("y", "Y", "3", 4.0),
        ];
        // 12.5 / 3 = 4.1666...
        assert_eq!(group_by_listing(&uneven)[0].avg_rating, 4.2);
    }

    #[test]
    fn category_average_skips_reviews_without_that_category() {
        let mut a = review_at("1", 4.0, 1);
        a.categories = BTreeMap::from([("cleanliness".to_string(), 10.0), ("value".to_string(), 4.0)]);
        let mut b = review_at("2", 4.0, 2);
        b.categories = BTreeMap::from([("cleanliness".to_string(), 6.0)]);
        let c = review_at("3", 4.0, 3);

        let averages = category_averages(&[a, b, c]);
        assert_eq!(averages["cleanliness"], 8.0);
        assert_eq!(averages["value"], 4.0);
        assert_eq!(averages.len(), 2);
    }

    #[test]
    fn channels_are_deduplicated() {
        let mut reviews = vec![
            review_for("x", "X", "1", 4.0),
            review_for("x", "X", "2", 4.0),
            review_for("x", "X", "3", 4.0),
        ];
        reviews[1].channel = Channel::Google;

        let listing = &group_by_listing(&reviews)[0];
        assert_eq!(listing.channels.len(), 2);
        assert!(listing.channels.contains(&Channel::Google));
        assert!(listing.channels.contains(&Channel::Airbnb));
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_by_listing(&[]).is_empty());
    }
}
