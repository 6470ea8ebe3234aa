use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, EntityTrait};
use uuid::Uuid;

use crate::{
    dto::subscriptions::{CreateSubscriptionRequest, SubscriptionData},
    entity::subscriptions::{
        ActiveModel as SubscriptionActive, Column as SubscriptionCol, Entity as Subscriptions,
        Model as SubscriptionModel,
    },
    error::{AppError, AppResult},
    models::Subscription,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// A customer with no subscription gets `subscription: null`, not a 404.
pub async fn get_for_customer(
    state: &AppState,
    customer_id: Uuid,
) -> AppResult<ApiResponse<SubscriptionData>> {
    let subscription = Subscriptions::find_by_id(customer_id)
        .one(&state.orm)
        .await?
        .map(subscription_from_entity);

    Ok(ApiResponse::success(
        "Ok",
        SubscriptionData { subscription },
        Some(Meta::empty()),
    ))
}

/// Create or replace the customer's plan; re-subscribing reactivates.
pub async fn create_subscription(
    state: &AppState,
    payload: CreateSubscriptionRequest,
) -> AppResult<ApiResponse<SubscriptionData>> {
    let (customer_id, plan_type) = payload.validate().map_err(AppError::BadRequest)?;
    let preferences = payload.preferences.unwrap_or_else(|| serde_json::json!({}));
    let now = Utc::now();

    let active = SubscriptionActive {
        customer_id: Set(customer_id),
        plan_type: Set(plan_type),
        preferences: Set(preferences),
        active: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };

    Subscriptions::insert(active)
        .on_conflict(
            OnConflict::column(SubscriptionCol::CustomerId)
                .update_columns([
                    SubscriptionCol::PlanType,
                    SubscriptionCol::Preferences,
                    SubscriptionCol::Active,
                    SubscriptionCol::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec(&state.orm)
        .await?;

    let subscription = Subscriptions::find_by_id(customer_id)
        .one(&state.orm)
        .await?
        .map(subscription_from_entity);

    Ok(ApiResponse::success(
        "Subscription created",
        SubscriptionData { subscription },
        Some(Meta::empty()),
    ))
}

pub async fn cancel_subscription(
    state: &AppState,
    customer_id: Uuid,
) -> AppResult<ApiResponse<SubscriptionData>> {
    let existing = Subscriptions::find_by_id(customer_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: SubscriptionActive = existing.into();
    active.active = Set(false);
    active.updated_at = Set(Utc::now().into());
    let model = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Subscription cancelled",
        SubscriptionData {
            subscription: Some(subscription_from_entity(model)),
        },
        Some(Meta::empty()),
    ))
}

fn subscription_from_entity(model: SubscriptionModel) -> Subscription {
    Subscription {
        customer_id: model.customer_id,
        plan_type: model.plan_type,
        preferences: model.preferences,
        active: model.active,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
