use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    dto::promos::{CreatePromoRequest, PromoList, UpdatePromoRequest},
    entity::promos::{
        ActiveModel as PromoActive, Column as PromoCol, Entity as Promos, Model as PromoModel,
    },
    error::{AppError, AppResult},
    models::Promo,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Promos that are switched on and not yet expired.
pub async fn list_active(state: &AppState) -> AppResult<ApiResponse<PromoList>> {
    let promos = Promos::find()
        .filter(PromoCol::Active.eq(true))
        .filter(PromoCol::ValidUntil.gte(Utc::now()))
        .order_by_desc(PromoCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(promo_from_entity)
        .collect::<Vec<_>>();

    let meta = Meta::count(promos.len() as i64);
    Ok(ApiResponse::success("Ok", PromoList { promos }, Some(meta)))
}

pub async fn list_by_restaurant(
    state: &AppState,
    restaurant_id: Uuid,
) -> AppResult<ApiResponse<PromoList>> {
    let promos = Promos::find()
        .filter(PromoCol::RestaurantId.eq(restaurant_id))
        .order_by_desc(PromoCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(promo_from_entity)
        .collect::<Vec<_>>();

    let meta = Meta::count(promos.len() as i64);
    Ok(ApiResponse::success("Ok", PromoList { promos }, Some(meta)))
}

pub async fn create_promo(
    state: &AppState,
    payload: CreatePromoRequest,
) -> AppResult<ApiResponse<Promo>> {
    let new_promo = payload.validate().map_err(AppError::BadRequest)?;
    let now = Utc::now();

    let model = PromoActive {
        id: Set(Uuid::new_v4()),
        restaurant_id: Set(new_promo.restaurant_id),
        restaurant_name: Set(new_promo.restaurant_name),
        title: Set(new_promo.title),
        description: Set(new_promo.description),
        discount_percent: Set(new_promo.discount_percent),
        code: Set(new_promo.code),
        valid_until: Set(new_promo.valid_until.into()),
        active: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Promo created",
        promo_from_entity(model),
        Some(Meta::empty()),
    ))
}

pub async fn update_promo(
    state: &AppState,
    id: Uuid,
    payload: UpdatePromoRequest,
) -> AppResult<ApiResponse<Promo>> {
    let existing = Promos::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    if let Some(discount) = payload.discount_percent {
        if !(1..=100).contains(&discount) {
            return Err(AppError::BadRequest(
                "discount_percent must be between 1 and 100".into(),
            ));
        }
    }

    let mut active: PromoActive = existing.into();
    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(discount) = payload.discount_percent {
        active.discount_percent = Set(discount);
    }
    if let Some(code) = payload.code {
        active.code = Set(code);
    }
    if let Some(valid_until) = payload.valid_until {
        active.valid_until = Set(valid_until.into());
    }
    if let Some(is_active) = payload.active {
        active.active = Set(is_active);
    }
    active.updated_at = Set(Utc::now().into());

    let model = active.update(&state.orm).await?;
    Ok(ApiResponse::success(
        "Promo updated",
        promo_from_entity(model),
        Some(Meta::empty()),
    ))
}

pub async fn delete_promo(state: &AppState, id: Uuid) -> AppResult<ApiResponse<()>> {
    let result = Promos::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(ApiResponse::success(
        "Promo deleted",
        (),
        Some(Meta::empty()),
    ))
}

fn promo_from_entity(model: PromoModel) -> Promo {
    Promo {
        id: model.id,
        restaurant_id: model.restaurant_id,
        restaurant_name: model.restaurant_name,
        title: model.title,
        description: model.description,
        discount_percent: model.discount_percent,
        code: model.code,
        valid_until: model.valid_until.with_timezone(&Utc),
        active: model.active,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
