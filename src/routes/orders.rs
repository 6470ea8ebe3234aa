use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::orders::{
        AssignDeliveryRequest, CreateOrderRequest, OrderList, OrderWithLocation, RateOrderRequest,
        UpdateStatusRequest,
    },
    error::{AppError, AppResult},
    models::Order,
    response::ApiResponse,
    routes::params::{CustomerQuery, RestaurantQuery},
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_order))
        .route("/customer", get(customer_orders))
        .route("/restaurant", get(restaurant_orders))
        .route("/available", get(available_orders))
        .route("/{id}", get(get_order))
        .route("/{id}/status", put(update_status))
        .route("/{id}/assign-delivery", put(assign_delivery))
        .route("/{id}/rate", post(rate_order))
}

#[utoipa::path(post, path = "/orders", tag = "Orders")]
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Order>>)> {
    let response = order_service::create_order(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(get, path = "/orders/customer", tag = "Orders")]
pub async fn customer_orders(
    State(state): State<AppState>,
    Query(query): Query<CustomerQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let customer_id = query
        .customer_id
        .ok_or_else(|| AppError::BadRequest("customer_id is required".into()))?;
    Ok(Json(
        order_service::list_by_customer(&state, customer_id).await?,
    ))
}

#[utoipa::path(get, path = "/orders/restaurant", tag = "Orders")]
pub async fn restaurant_orders(
    State(state): State<AppState>,
    Query(query): Query<RestaurantQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let restaurant_id = query
        .restaurant_id
        .ok_or_else(|| AppError::BadRequest("restaurant_id is required".into()))?;
    Ok(Json(
        order_service::list_by_restaurant(&state, restaurant_id).await?,
    ))
}

#[utoipa::path(get, path = "/orders/available", tag = "Orders")]
pub async fn available_orders(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    Ok(Json(order_service::list_pending(&state).await?))
}

#[utoipa::path(get, path = "/orders/{id}", tag = "Orders")]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderWithLocation>>> {
    Ok(Json(order_service::get_order(&state, id).await?))
}

#[utoipa::path(put, path = "/orders/{id}/status", tag = "Orders")]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    Ok(Json(order_service::update_status(&state, id, payload).await?))
}

#[utoipa::path(put, path = "/orders/{id}/assign-delivery", tag = "Orders")]
pub async fn assign_delivery(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignDeliveryRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    Ok(Json(
        order_service::assign_partner(&state, id, payload).await?,
    ))
}

#[utoipa::path(post, path = "/orders/{id}/rate", tag = "Orders")]
pub async fn rate_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RateOrderRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    Ok(Json(order_service::rate_order(&state, id, payload).await?))
}
