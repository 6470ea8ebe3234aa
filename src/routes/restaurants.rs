use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::restaurants::{
        CreateRestaurantRequest, RestaurantList, UpdateMenuRequest, UpdateRestaurantRequest,
    },
    error::{AppError, AppResult},
    models::Restaurant,
    response::ApiResponse,
    routes::params::OwnerQuery,
    services::restaurant_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_restaurant).get(list_restaurants))
        .route("/owner", get(owner_restaurants))
        .route(
            "/{id}",
            get(get_restaurant)
                .put(update_restaurant)
                .delete(delete_restaurant),
        )
        .route("/{id}/menu", put(update_menu))
}

#[utoipa::path(post, path = "/restaurants", tag = "Restaurants")]
pub async fn create_restaurant(
    State(state): State<AppState>,
    Json(payload): Json<CreateRestaurantRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Restaurant>>)> {
    let response = restaurant_service::create_restaurant(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(get, path = "/restaurants", tag = "Restaurants")]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<RestaurantList>>> {
    Ok(Json(restaurant_service::list_active(&state).await?))
}

#[utoipa::path(get, path = "/restaurants/owner", tag = "Restaurants")]
pub async fn owner_restaurants(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> AppResult<Json<ApiResponse<RestaurantList>>> {
    let owner_id = query
        .owner_id
        .ok_or_else(|| AppError::BadRequest("owner_id is required".into()))?;
    Ok(Json(
        restaurant_service::list_by_owner(&state, owner_id).await?,
    ))
}

#[utoipa::path(get, path = "/restaurants/{id}", tag = "Restaurants")]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Restaurant>>> {
    Ok(Json(restaurant_service::get_restaurant(&state, id).await?))
}

#[utoipa::path(put, path = "/restaurants/{id}", tag = "Restaurants")]
pub async fn update_restaurant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRestaurantRequest>,
) -> AppResult<Json<ApiResponse<Restaurant>>> {
    Ok(Json(
        restaurant_service::update_restaurant(&state, id, payload).await?,
    ))
}

#[utoipa::path(put, path = "/restaurants/{id}/menu", tag = "Restaurants")]
pub async fn update_menu(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMenuRequest>,
) -> AppResult<Json<ApiResponse<Restaurant>>> {
    Ok(Json(
        restaurant_service::update_menu(&state, id, payload).await?,
    ))
}

#[utoipa::path(delete, path = "/restaurants/{id}", tag = "Restaurants")]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    Ok(Json(
        restaurant_service::delete_restaurant(&state, id).await?,
    ))
}
