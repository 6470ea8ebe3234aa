use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::promos::{CreatePromoRequest, PromoList, UpdatePromoRequest},
    error::AppResult,
    models::Promo,
    response::ApiResponse,
    services::promo_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_promo))
        .route("/active", get(active_promos))
        .route("/restaurant/{restaurant_id}", get(restaurant_promos))
        .route("/{id}", put(update_promo).delete(delete_promo))
}

#[utoipa::path(get, path = "/promos/active", tag = "Promos")]
pub async fn active_promos(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<PromoList>>> {
    Ok(Json(promo_service::list_active(&state).await?))
}

#[utoipa::path(get, path = "/promos/restaurant/{restaurant_id}", tag = "Promos")]
pub async fn restaurant_promos(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<PromoList>>> {
    Ok(Json(
        promo_service::list_by_restaurant(&state, restaurant_id).await?,
    ))
}

#[utoipa::path(post, path = "/promos", tag = "Promos")]
pub async fn create_promo(
    State(state): State<AppState>,
    Json(payload): Json<CreatePromoRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Promo>>)> {
    let response = promo_service::create_promo(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(put, path = "/promos/{id}", tag = "Promos")]
pub async fn update_promo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePromoRequest>,
) -> AppResult<Json<ApiResponse<Promo>>> {
    Ok(Json(promo_service::update_promo(&state, id, payload).await?))
}

#[utoipa::path(delete, path = "/promos/{id}", tag = "Promos")]
pub async fn delete_promo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    Ok(Json(promo_service::delete_promo(&state, id).await?))
}
