use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::analytics::{
        CustomerAnalytics, DeliveryAnalytics, OrdersAnalytics, RestaurantAnalytics,
    },
    error::AppResult,
    response::ApiResponse,
    routes::params::AnalyticsQuery,
    services::analytics_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurant/{restaurant_id}", get(restaurant_analytics))
        .route("/customer/{customer_id}", get(customer_analytics))
        .route("/delivery/{rider_id}", get(delivery_analytics))
        .route("/orders/restaurant/{restaurant_id}", get(orders_analytics))
}

#[utoipa::path(get, path = "/analytics/restaurant/{restaurant_id}", tag = "Analytics")]
pub async fn restaurant_analytics(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<ApiResponse<RestaurantAnalytics>>> {
    Ok(Json(
        analytics_service::restaurant_analytics(&state, restaurant_id, query.cutoff()).await?,
    ))
}

#[utoipa::path(get, path = "/analytics/customer/{customer_id}", tag = "Analytics")]
pub async fn customer_analytics(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<ApiResponse<CustomerAnalytics>>> {
    Ok(Json(
        analytics_service::customer_analytics(&state, customer_id, query.cutoff()).await?,
    ))
}

#[utoipa::path(get, path = "/analytics/delivery/{rider_id}", tag = "Analytics")]
pub async fn delivery_analytics(
    State(state): State<AppState>,
    Path(rider_id): Path<Uuid>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<ApiResponse<DeliveryAnalytics>>> {
    Ok(Json(
        analytics_service::delivery_analytics(&state, rider_id, query.cutoff()).await?,
    ))
}

#[utoipa::path(get, path = "/analytics/orders/restaurant/{restaurant_id}", tag = "Analytics")]
pub async fn orders_analytics(
    State(state): State<AppState>,
    Path(restaurant_id): Path<Uuid>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<ApiResponse<OrdersAnalytics>>> {
    Ok(Json(
        analytics_service::orders_analytics(&state, restaurant_id, query.cutoff()).await?,
    ))
}
