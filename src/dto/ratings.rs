use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Rating;

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingList {
    pub ratings: Vec<Rating>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingStats {
    pub average_rating: f64,
    pub total_ratings: i64,
    /// Counts for 1..=5 stars, lowest first.
    pub rating_distribution: [i64; 5],
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecalculatedRating {
    pub average_rating: f64,
    pub total_ratings: i64,
}
