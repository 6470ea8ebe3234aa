use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    dto::{
        delivery::TrackData,
        orders::{
            AssignDeliveryRequest, CreateOrderRequest, OrderList, OrderWithLocation,
            RateOrderRequest, UpdateStatusRequest,
        },
    },
    entity::orders::{
        ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel,
    },
    error::{AppError, AppResult},
    models::{LivePoint, Order, OrderRatings, OrderStatus, RatingEntry, RatingRole},
    response::{ApiResponse, Meta},
    services::{location_service, quest_service, rating_service},
    state::AppState,
};

pub async fn create_order(
    state: &AppState,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    let new_order = payload.validate().map_err(AppError::BadRequest)?;
    let now = Utc::now();

    let model = OrderActive {
        id: Set(Uuid::new_v4()),
        customer_id: Set(new_order.customer_id),
        restaurant_id: Set(new_order.restaurant_id),
        delivery_partner_id: Set(None),
        items: Set(serde_json::to_value(&new_order.items).map_err(|e| AppError::Internal(e.into()))?),
        total_amount: Set(new_order.total_amount),
        delivery_address: Set(
            serde_json::to_value(&new_order.delivery_address)
                .map_err(|e| AppError::Internal(e.into()))?,
        ),
        status: Set(OrderStatus::Pending),
        ratings: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        delivered_at: Set(None),
    }
    .insert(&state.orm)
    .await?;

    // Quest progress is gamification, not part of the order write. It runs
    // detached; a failure only warns.
    let pool = state.pool.clone();
    let customer_id = new_order.customer_id;
    tokio::spawn(async move {
        if let Err(err) = quest_service::record_order_placed(&pool, customer_id).await {
            tracing::warn!(error = %err, %customer_id, "quest progress update failed");
        }
    });

    Ok(ApiResponse::success(
        "Order created",
        order_from_entity(model)?,
        Some(Meta::empty()),
    ))
}

pub async fn list_by_customer(
    state: &AppState,
    customer_id: Uuid,
) -> AppResult<ApiResponse<OrderList>> {
    let orders = Orders::find()
        .filter(OrderCol::CustomerId.eq(customer_id))
        .order_by_desc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::count(orders.len() as i64);
    Ok(ApiResponse::success("Ok", OrderList { orders }, Some(meta)))
}

pub async fn list_by_restaurant(
    state: &AppState,
    restaurant_id: Uuid,
) -> AppResult<ApiResponse<OrderList>> {
    let orders = Orders::find()
        .filter(OrderCol::RestaurantId.eq(restaurant_id))
        .order_by_desc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::count(orders.len() as i64);
    Ok(ApiResponse::success("Ok", OrderList { orders }, Some(meta)))
}

/// Orders no partner has picked up yet; the delivery-partner feed.
pub async fn list_pending(state: &AppState) -> AppResult<ApiResponse<OrderList>> {
    let orders = Orders::find()
        .filter(OrderCol::Status.eq(OrderStatus::Pending))
        .order_by_desc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::count(orders.len() as i64);
    Ok(ApiResponse::success("Ok", OrderList { orders }, Some(meta)))
}

pub async fn get_order(state: &AppState, id: Uuid) -> AppResult<ApiResponse<OrderWithLocation>> {
    let order = find_order(state, id).await?;
    let live_location = live_location_for(state, &order).await?;

    Ok(ApiResponse::success(
        "Ok",
        OrderWithLocation {
            order,
            live_location,
        },
        Some(Meta::empty()),
    ))
}

pub async fn update_status(
    state: &AppState,
    id: Uuid,
    payload: UpdateStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    let status_str = payload
        .status
        .ok_or_else(|| AppError::BadRequest("status is required".into()))?;
    // Unknown values are rejected before any storage access.
    let next: OrderStatus = status_str.parse().map_err(AppError::BadRequest)?;

    let existing = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let current = existing.status;
    if current == next {
        // Idempotent repeat: nothing is written, delivered_at keeps its
        // original value.
        return Ok(ApiResponse::success(
            "Status unchanged",
            order_from_entity(existing)?,
            Some(Meta::empty()),
        ));
    }
    if !current.can_transition(next) {
        return Err(AppError::BadRequest(format!(
            "cannot move order from {current} to {next}"
        )));
    }

    let now = Utc::now();
    let mut active: OrderActive = existing.into();
    active.status = Set(next);
    active.updated_at = Set(now.into());
    if next == OrderStatus::Delivered {
        active.delivered_at = Set(Some(now.into()));
    }
    let model = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Status updated",
        order_from_entity(model)?,
        Some(Meta::empty()),
    ))
}

pub async fn assign_partner(
    state: &AppState,
    id: Uuid,
    payload: AssignDeliveryRequest,
) -> AppResult<ApiResponse<Order>> {
    let partner_id = payload
        .delivery_partner_id
        .ok_or_else(|| AppError::BadRequest("delivery_partner_id is required".into()))?;

    let existing = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    // Whether the partner is actually free is the dispatcher's concern;
    // see user_service::list_free_riders.
    let mut active: OrderActive = existing.into();
    active.delivery_partner_id = Set(Some(partner_id));
    active.updated_at = Set(Utc::now().into());
    let model = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Delivery partner assigned",
        order_from_entity(model)?,
        Some(Meta::empty()),
    ))
}

pub async fn rate_order(
    state: &AppState,
    id: Uuid,
    payload: RateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    let (customer_id, rating) = payload.validate().map_err(AppError::BadRequest)?;
    let order = find_order(state, id).await?;

    if order.customer_id != customer_id {
        return Err(AppError::Forbidden);
    }
    if order.status != OrderStatus::Delivered {
        return Err(AppError::BadRequest("order is not delivered yet".into()));
    }
    if order.ratings.for_role(RatingRole::Customer).is_some() {
        return Err(AppError::BadRequest("order already rated".into()));
    }

    let entry = RatingEntry {
        rating,
        review: payload.review.clone(),
        rated_at: Utc::now(),
    };
    if !apply_rating(state, id, RatingRole::Customer, &entry).await? {
        return Err(AppError::BadRequest("order already rated".into()));
    }

    rating_service::record_customer_rating(state, &order, rating, payload.review.clone()).await?;

    // Aggregate refresh is best-effort: the rating stands even if the
    // recalculation fails.
    if let Err(err) = rating_service::recalculate_restaurant_rating(state, order.restaurant_id).await
    {
        tracing::warn!(
            error = %err,
            restaurant_id = %order.restaurant_id,
            "restaurant rating recalculation failed"
        );
    }

    let order = find_order(state, id).await?;
    Ok(ApiResponse::success(
        "Rating recorded",
        order,
        Some(Meta::empty()),
    ))
}

/// Join an order with its rider's current fix; what `GET /delivery/track`
/// serves and what the tracking client polls.
pub async fn track_order(state: &AppState, order_id: Uuid) -> AppResult<TrackData> {
    let order = find_order(state, order_id).await?;
    let Some(rider_id) = order.delivery_partner_id else {
        return Err(AppError::BadRequest("no delivery partner assigned".into()));
    };

    let fix = match location_service::location_by_rider(state, rider_id).await? {
        Some(fix) => Some(fix),
        // The partner may have been swapped since the fix was tagged.
        None => location_service::location_by_order(state, order_id).await?,
    };

    Ok(TrackData {
        location: fix.map(LivePoint::from),
    })
}

/// Attach a rating under the given role. Single conditional write: the
/// "not yet rated" guard is re-checked inside the statement, so two racing
/// submissions cannot both land. Returns false when the role has already
/// rated (or the order vanished underneath us).
async fn apply_rating(
    state: &AppState,
    order_id: Uuid,
    role: RatingRole,
    entry: &RatingEntry,
) -> AppResult<bool> {
    let entry_json = serde_json::to_value(entry).map_err(|e| AppError::Internal(e.into()))?;

    let result = sqlx::query(
        r#"
        UPDATE orders
        SET ratings = jsonb_set(COALESCE(ratings, '{}'::jsonb), ARRAY[$3], $2::jsonb, true),
            updated_at = now()
        WHERE id = $1 AND (ratings -> $3) IS NULL
        "#,
    )
    .bind(order_id)
    .bind(&entry_json)
    .bind(role.as_str())
    .execute(&state.pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

async fn find_order(state: &AppState, id: Uuid) -> AppResult<Order> {
    match Orders::find_by_id(id).one(&state.orm).await? {
        Some(model) => order_from_entity(model),
        None => Err(AppError::NotFound),
    }
}

async fn live_location_for(state: &AppState, order: &Order) -> AppResult<Option<LivePoint>> {
    let Some(rider_id) = order.delivery_partner_id else {
        return Ok(None);
    };
    if !order.status.is_trackable() {
        return Ok(None);
    }
    let fix = location_service::location_by_rider(state, rider_id).await?;
    Ok(fix.map(LivePoint::from))
}

fn order_from_entity(model: OrderModel) -> AppResult<Order> {
    let items = serde_json::from_value(model.items)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("corrupt order items: {e}")))?;
    let delivery_address = serde_json::from_value(model.delivery_address)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("corrupt delivery address: {e}")))?;
    let ratings = match model.ratings {
        Some(value) => serde_json::from_value(value)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("corrupt ratings map: {e}")))?,
        None => OrderRatings::default(),
    };

    Ok(Order {
        id: model.id,
        customer_id: model.customer_id,
        restaurant_id: model.restaurant_id,
        delivery_partner_id: model.delivery_partner_id,
        items,
        total_amount: model.total_amount,
        delivery_address,
        status: model.status,
        ratings,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
        delivered_at: model.delivered_at.map(|dt| dt.with_timezone(&Utc)),
    })
}
