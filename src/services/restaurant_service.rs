use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    dto::restaurants::{
        CreateRestaurantRequest, RestaurantList, UpdateMenuRequest, UpdateRestaurantRequest,
    },
    entity::restaurants::{
        ActiveModel as RestaurantActive, Column as RestaurantCol, Entity as Restaurants,
        Model as RestaurantModel,
    },
    error::{AppError, AppResult},
    models::{GeoPoint, Restaurant},
    response::{ApiResponse, Meta},
    state::AppState,
};

const DEFAULT_DELIVERY_TIME: &str = "30-45 min";

pub async fn create_restaurant(
    state: &AppState,
    payload: CreateRestaurantRequest,
) -> AppResult<ApiResponse<Restaurant>> {
    let (owner_id, name) = payload.validate().map_err(AppError::BadRequest)?;
    // Coordinates that don't parse as a point are stored as "no location",
    // never rejected.
    let location = payload.location.filter(GeoPoint::is_valid);
    let menu = payload.menu.unwrap_or_default();
    let now = Utc::now();

    let model = RestaurantActive {
        id: Set(Uuid::new_v4()),
        owner_id: Set(owner_id),
        name: Set(name),
        cuisine: Set(payload.cuisine),
        description: Set(payload.description),
        menu: Set(serde_json::to_value(&menu).map_err(|e| AppError::Internal(e.into()))?),
        lat: Set(location.map(|l| l.lat)),
        lng: Set(location.map(|l| l.lng)),
        rating: Set(0.0),
        rating_count: Set(0),
        delivery_time: Set(payload
            .delivery_time
            .unwrap_or_else(|| DEFAULT_DELIVERY_TIME.to_string())),
        is_local_legend: Set(false),
        address: Set(payload.address),
        phone: Set(payload.phone),
        email: Set(payload.email),
        is_active: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Restaurant created",
        restaurant_from_entity(model)?,
        Some(Meta::empty()),
    ))
}

pub async fn list_active(state: &AppState) -> AppResult<ApiResponse<RestaurantList>> {
    let restaurants = Restaurants::find()
        .filter(RestaurantCol::IsActive.eq(true))
        .order_by_desc(RestaurantCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(restaurant_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::count(restaurants.len() as i64);
    Ok(ApiResponse::success(
        "Ok",
        RestaurantList { restaurants },
        Some(meta),
    ))
}

pub async fn list_by_owner(
    state: &AppState,
    owner_id: Uuid,
) -> AppResult<ApiResponse<RestaurantList>> {
    let restaurants = Restaurants::find()
        .filter(RestaurantCol::OwnerId.eq(owner_id))
        .order_by_desc(RestaurantCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(restaurant_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::count(restaurants.len() as i64);
    Ok(ApiResponse::success(
        "Ok",
        RestaurantList { restaurants },
        Some(meta),
    ))
}

pub async fn get_restaurant(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Restaurant>> {
    let model = Restaurants::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(ApiResponse::success(
        "Ok",
        restaurant_from_entity(model)?,
        Some(Meta::empty()),
    ))
}

pub async fn update_restaurant(
    state: &AppState,
    id: Uuid,
    payload: UpdateRestaurantRequest,
) -> AppResult<ApiResponse<Restaurant>> {
    let existing = Restaurants::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: RestaurantActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(cuisine) = payload.cuisine {
        active.cuisine = Set(Some(cuisine));
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(location) = payload.location {
        // Invalid coordinates clear the stored point.
        if location.is_valid() {
            active.lat = Set(Some(location.lat));
            active.lng = Set(Some(location.lng));
        } else {
            active.lat = Set(None);
            active.lng = Set(None);
        }
    }
    if let Some(delivery_time) = payload.delivery_time {
        active.delivery_time = Set(delivery_time);
    }
    if let Some(is_local_legend) = payload.is_local_legend {
        active.is_local_legend = Set(is_local_legend);
    }
    if let Some(address) = payload.address {
        active.address = Set(Some(address));
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(email) = payload.email {
        active.email = Set(Some(email));
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(Utc::now().into());

    let model = active.update(&state.orm).await?;
    Ok(ApiResponse::success(
        "Restaurant updated",
        restaurant_from_entity(model)?,
        Some(Meta::empty()),
    ))
}

/// Replace the whole menu. Item-level edits are a client concern.
pub async fn update_menu(
    state: &AppState,
    id: Uuid,
    payload: UpdateMenuRequest,
) -> AppResult<ApiResponse<Restaurant>> {
    let menu = payload
        .menu
        .ok_or_else(|| AppError::BadRequest("menu is required".into()))?;

    let existing = Restaurants::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: RestaurantActive = existing.into();
    active.menu = Set(serde_json::to_value(&menu).map_err(|e| AppError::Internal(e.into()))?);
    active.updated_at = Set(Utc::now().into());

    let model = active.update(&state.orm).await?;
    Ok(ApiResponse::success(
        "Menu updated",
        restaurant_from_entity(model)?,
        Some(Meta::empty()),
    ))
}

pub async fn delete_restaurant(state: &AppState, id: Uuid) -> AppResult<ApiResponse<()>> {
    let result = Restaurants::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(ApiResponse::success(
        "Restaurant deleted",
        (),
        Some(Meta::empty()),
    ))
}

fn restaurant_from_entity(model: RestaurantModel) -> AppResult<Restaurant> {
    let menu = serde_json::from_value(model.menu)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("corrupt menu: {e}")))?;
    let location = match (model.lat, model.lng) {
        (Some(lat), Some(lng)) => Some(GeoPoint { lat, lng }),
        _ => None,
    };

    Ok(Restaurant {
        id: model.id,
        owner_id: model.owner_id,
        name: model.name,
        cuisine: model.cuisine,
        description: model.description,
        menu,
        location,
        rating: model.rating,
        rating_count: model.rating_count,
        delivery_time: model.delivery_time,
        is_local_legend: model.is_local_legend,
        address: model.address,
        phone: model.phone,
        email: model.email,
        is_active: model.is_active,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}
