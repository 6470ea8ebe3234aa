use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    dto::delivery::SetLocationRequest,
    entity::delivery_locations::{
        ActiveModel as LocationActive, Column as LocationCol, Entity as DeliveryLocations,
        Model as LocationModel,
    },
    error::{AppError, AppResult},
    models::DeliveryFix,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Upsert the rider's current fix. Last write wins; no history is kept and
/// a late-arriving stale fix overwrites a newer one.
pub async fn set_location(
    state: &AppState,
    payload: SetLocationRequest,
) -> AppResult<ApiResponse<DeliveryFix>> {
    let new_fix = payload.validate().map_err(AppError::BadRequest)?;
    let now = Utc::now();

    let active = LocationActive {
        rider_id: Set(new_fix.rider_id),
        order_id: Set(new_fix.order_id),
        lat: Set(new_fix.lat),
        lng: Set(new_fix.lng),
        updated_at: Set(now.into()),
    };

    DeliveryLocations::insert(active)
        .on_conflict(
            OnConflict::column(LocationCol::RiderId)
                .update_columns([
                    LocationCol::OrderId,
                    LocationCol::Lat,
                    LocationCol::Lng,
                    LocationCol::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec(&state.orm)
        .await?;

    let fix = DeliveryFix {
        rider_id: new_fix.rider_id,
        order_id: new_fix.order_id,
        lat: new_fix.lat,
        lng: new_fix.lng,
        updated_at: now,
    };

    Ok(ApiResponse::success(
        "Location updated",
        fix,
        Some(Meta::empty()),
    ))
}

// Readers get whatever is stored, however old; staleness is the caller's
// problem.
pub async fn location_by_rider(
    state: &AppState,
    rider_id: Uuid,
) -> AppResult<Option<DeliveryFix>> {
    let model = DeliveryLocations::find_by_id(rider_id).one(&state.orm).await?;
    Ok(model.map(fix_from_entity))
}

/// Reverse lookup for callers that only know the order. At most one rider
/// is tagged with a given order at a time.
pub async fn location_by_order(
    state: &AppState,
    order_id: Uuid,
) -> AppResult<Option<DeliveryFix>> {
    let model = DeliveryLocations::find()
        .filter(LocationCol::OrderId.eq(order_id))
        .one(&state.orm)
        .await?;
    Ok(model.map(fix_from_entity))
}

fn fix_from_entity(model: LocationModel) -> DeliveryFix {
    DeliveryFix {
        rider_id: model.rider_id,
        order_id: model.order_id,
        lat: model.lat,
        lng: model.lng,
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
