use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::wishlist::{WishlistData, WishlistMutationRequest},
    error::AppResult,
    response::ApiResponse,
    services::wishlist_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{customer_id}", get(get_wishlist))
        .route("/{customer_id}/add", post(add_item))
        .route("/{customer_id}/remove", post(remove_item))
}

#[utoipa::path(get, path = "/wishlist/{customer_id}", tag = "Wishlist")]
pub async fn get_wishlist(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<WishlistData>>> {
    Ok(Json(
        wishlist_service::get_wishlist(&state, customer_id).await?,
    ))
}

#[utoipa::path(post, path = "/wishlist/{customer_id}/add", tag = "Wishlist")]
pub async fn add_item(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
    Json(payload): Json<WishlistMutationRequest>,
) -> AppResult<Json<ApiResponse<WishlistData>>> {
    Ok(Json(
        wishlist_service::add_item(&state, customer_id, payload).await?,
    ))
}

#[utoipa::path(post, path = "/wishlist/{customer_id}/remove", tag = "Wishlist")]
pub async fn remove_item(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
    Json(payload): Json<WishlistMutationRequest>,
) -> AppResult<Json<ApiResponse<WishlistData>>> {
    Ok(Json(
        wishlist_service::remove_item(&state, customer_id, payload).await?,
    ))
}
