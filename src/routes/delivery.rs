use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::delivery::{RiderList, SetLocationRequest, TrackData},
    error::AppResult,
    models::DeliveryFix,
    response::{ApiResponse, Meta},
    services::{location_service, order_service, user_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/location", post(set_location))
        .route("/track/{order_id}", get(track_order))
        .route("/free-riders", get(free_riders))
}

/// Riders push their position here on every fix.
#[utoipa::path(post, path = "/delivery/location", tag = "Delivery")]
pub async fn set_location(
    State(state): State<AppState>,
    Json(payload): Json<SetLocationRequest>,
) -> AppResult<Json<ApiResponse<DeliveryFix>>> {
    Ok(Json(location_service::set_location(&state, payload).await?))
}

/// Customers poll this while the tracking view is open.
#[utoipa::path(get, path = "/delivery/track/{order_id}", tag = "Delivery")]
pub async fn track_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<TrackData>>> {
    let data = order_service::track_order(&state, order_id).await?;
    Ok(Json(ApiResponse::success("Ok", data, Some(Meta::empty()))))
}

#[utoipa::path(get, path = "/delivery/free-riders", tag = "Delivery")]
pub async fn free_riders(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<RiderList>>> {
    Ok(Json(user_service::list_free_riders(&state).await?))
}
