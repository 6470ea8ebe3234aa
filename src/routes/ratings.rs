use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::ratings::{RatingList, RatingStats, RecalculatedRating},
    error::AppResult,
    response::{ApiResponse, Meta},
    services::rating_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurant/{restaurant_id}", get(restaurant_ratings))
        .route("/restaurant/{restaurant_id}/stats", get(restaurant_stats))
        .route(
            "/restaurant/{restaurant_id}/recalculate",
            post(recalculate),
        )
}

#[utoipa::path(get, path = "/ratings/restaurant/{restaurant_id}", tag = "Ratings")]
pub async fn restaurant_ratings(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<RatingList>>> {
    Ok(Json(
        rating_service::list_for_restaurant(&state, restaurant_id).await?,
    ))
}

#[utoipa::path(get, path = "/ratings/restaurant/{restaurant_id}/stats", tag = "Ratings")]
pub async fn restaurant_stats(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<RatingStats>>> {
    Ok(Json(
        rating_service::stats_for_restaurant(&state, restaurant_id).await?,
    ))
}

/// Manual aggregate refresh; the same recalculation normally runs after
/// each rating submission.
#[utoipa::path(post, path = "/ratings/restaurant/{restaurant_id}/recalculate", tag = "Ratings")]
pub async fn recalculate(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<RecalculatedRating>>> {
    let data = rating_service::recalculate_restaurant_rating(&state, restaurant_id).await?;
    Ok(Json(ApiResponse::success(
        "Restaurant rating recalculated",
        data,
        Some(Meta::empty()),
    )))
}
