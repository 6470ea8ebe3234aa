use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::subscriptions::{CreateSubscriptionRequest, SubscriptionData},
    error::AppResult,
    response::ApiResponse,
    services::subscription_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_subscription))
        .route("/{customer_id}", get(get_subscription))
        .route("/{customer_id}/cancel", put(cancel_subscription))
}

#[utoipa::path(get, path = "/subscriptions/{customer_id}", tag = "Subscriptions")]
pub async fn get_subscription(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SubscriptionData>>> {
    Ok(Json(
        subscription_service::get_for_customer(&state, customer_id).await?,
    ))
}

#[utoipa::path(post, path = "/subscriptions", tag = "Subscriptions")]
pub async fn create_subscription(
    State(state): State<AppState>,
    Json(payload): Json<CreateSubscriptionRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<SubscriptionData>>)> {
    let response = subscription_service::create_subscription(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(put, path = "/subscriptions/{customer_id}/cancel", tag = "Subscriptions")]
pub async fn cancel_subscription(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SubscriptionData>>> {
    Ok(Json(
        subscription_service::cancel_subscription(&state, customer_id).await?,
    ))
}
