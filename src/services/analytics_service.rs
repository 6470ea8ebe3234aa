use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    dto::analytics::{
        CustomerAnalytics, DeliveryAnalytics, DeliveryHistoryEntry, OrderHistoryEntry,
        OrdersAnalytics, RestaurantAnalytics,
    },
    error::{AppError, AppResult},
    models::OrderStatus,
    response::{ApiResponse, Meta},
    services::quest_service,
    state::AppState,
};

// Flat per-delivery payout, minor units.
const DELIVERY_FEE: i64 = 500;

const HISTORY_LIMIT: i64 = 5;

pub async fn restaurant_analytics(
    state: &AppState,
    restaurant_id: Uuid,
    cutoff: Option<DateTime<Utc>>,
) -> AppResult<ApiResponse<RestaurantAnalytics>> {
    let (total_orders, total_revenue): (i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(*), COALESCE(SUM(total_amount), 0)::bigint
        FROM orders
        WHERE restaurant_id = $1 AND ($2::timestamptz IS NULL OR created_at >= $2)
        "#,
    )
    .bind(restaurant_id)
    .bind(cutoff)
    .fetch_one(&state.pool)
    .await?;

    let (avg_rating,): (f64,) = sqlx::query_as(
        "SELECT COALESCE(AVG(rating), 0)::float8 FROM ratings WHERE restaurant_id = $1",
    )
    .bind(restaurant_id)
    .fetch_one(&state.pool)
    .await?;

    let total_menu_items = sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(jsonb_array_length(menu), 0)::bigint FROM restaurants WHERE id = $1",
    )
    .bind(restaurant_id)
    .fetch_optional(&state.pool)
    .await?
    .unwrap_or(0);

    Ok(ApiResponse::success(
        "Ok",
        RestaurantAnalytics {
            total_orders,
            total_revenue,
            avg_rating,
            total_menu_items,
            rating_distribution: Vec::new(),
            menu_popularity: Vec::new(),
            performance_metrics: Vec::new(),
            revenue_over_time: Vec::new(),
        },
        Some(Meta::empty()),
    ))
}

pub async fn customer_analytics(
    state: &AppState,
    customer_id: Uuid,
    cutoff: Option<DateTime<Utc>>,
) -> AppResult<ApiResponse<CustomerAnalytics>> {
    let (total_orders, total_spent): (i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(*), COALESCE(SUM(total_amount), 0)::bigint
        FROM orders
        WHERE customer_id = $1 AND ($2::timestamptz IS NULL OR created_at >= $2)
        "#,
    )
    .bind(customer_id)
    .bind(cutoff)
    .fetch_one(&state.pool)
    .await?;

    let avg_order_value = if total_orders > 0 {
        total_spent as f64 / total_orders as f64
    } else {
        0.0
    };

    let points_earned = quest_service::progress_for(&state.pool, customer_id)
        .await?
        .map(|p| p.total_points)
        .unwrap_or(0);

    let rows: Vec<(DateTime<Utc>, Uuid, i64, i64, String)> = sqlx::query_as(
        r#"
        SELECT created_at, restaurant_id, COALESCE(jsonb_array_length(items), 0)::bigint,
               total_amount, status
        FROM orders
        WHERE customer_id = $1 AND ($2::timestamptz IS NULL OR created_at >= $2)
        ORDER BY created_at DESC
        LIMIT $3
        "#,
    )
    .bind(customer_id)
    .bind(cutoff)
    .bind(HISTORY_LIMIT)
    .fetch_all(&state.pool)
    .await?;

    let order_history = rows
        .into_iter()
        .map(|(date, restaurant_id, items, total, status)| {
            Ok(OrderHistoryEntry {
                date,
                restaurant_id,
                items,
                total,
                status: parse_status(&status)?,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(ApiResponse::success(
        "Ok",
        CustomerAnalytics {
            total_orders,
            total_spent,
            avg_order_value,
            points_earned,
            order_history,
            spending_over_time: Vec::new(),
            favorite_restaurants: Vec::new(),
        },
        Some(Meta::empty()),
    ))
}

pub async fn delivery_analytics(
    state: &AppState,
    rider_id: Uuid,
    cutoff: Option<DateTime<Utc>>,
) -> AppResult<ApiResponse<DeliveryAnalytics>> {
    let (total_deliveries, completed): (i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(*), COUNT(*) FILTER (WHERE status = 'delivered')
        FROM orders
        WHERE delivery_partner_id = $1 AND ($2::timestamptz IS NULL OR created_at >= $2)
        "#,
    )
    .bind(rider_id)
    .bind(cutoff)
    .fetch_one(&state.pool)
    .await?;

    let completion_rate = percentage(completed, total_deliveries);

    let rows: Vec<(DateTime<Utc>, Uuid, String)> = sqlx::query_as(
        r#"
        SELECT created_at, restaurant_id, status
        FROM orders
        WHERE delivery_partner_id = $1 AND ($2::timestamptz IS NULL OR created_at >= $2)
        ORDER BY created_at DESC
        LIMIT $3
        "#,
    )
    .bind(rider_id)
    .bind(cutoff)
    .bind(HISTORY_LIMIT)
    .fetch_all(&state.pool)
    .await?;

    let delivery_history = rows
        .into_iter()
        .map(|(date, restaurant_id, status)| {
            Ok(DeliveryHistoryEntry {
                date,
                restaurant_id,
                earnings: DELIVERY_FEE,
                status: parse_status(&status)?,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(ApiResponse::success(
        "Ok",
        DeliveryAnalytics {
            total_deliveries,
            total_earnings: total_deliveries * DELIVERY_FEE,
            avg_earnings_per_delivery: DELIVERY_FEE,
            completion_rate,
            delivery_history,
            earnings_over_time: Vec::new(),
            deliveries_by_status: Vec::new(),
        },
        Some(Meta::empty()),
    ))
}

pub async fn orders_analytics(
    state: &AppState,
    restaurant_id: Uuid,
    cutoff: Option<DateTime<Utc>>,
) -> AppResult<ApiResponse<OrdersAnalytics>> {
    let (total_orders, total_revenue, completed): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(*), COALESCE(SUM(total_amount), 0)::bigint,
               COUNT(*) FILTER (WHERE status = 'delivered')
        FROM orders
        WHERE restaurant_id = $1 AND ($2::timestamptz IS NULL OR created_at >= $2)
        "#,
    )
    .bind(restaurant_id)
    .bind(cutoff)
    .fetch_one(&state.pool)
    .await?;

    let avg_order_value = if total_orders > 0 {
        total_revenue as f64 / total_orders as f64
    } else {
        0.0
    };

    Ok(ApiResponse::success(
        "Ok",
        OrdersAnalytics {
            total_orders,
            total_revenue,
            avg_order_value,
            completion_rate: percentage(completed, total_orders),
            orders_over_time: Vec::new(),
            top_items: Vec::new(),
            revenue_by_restaurant: Vec::new(),
            orders_by_status: Vec::new(),
        },
        Some(Meta::empty()),
    ))
}

fn parse_status(raw: &str) -> AppResult<OrderStatus> {
    raw.parse()
        .map_err(|e: String| AppError::Internal(anyhow::anyhow!(e)))
}

fn percentage(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let rate = part as f64 / whole as f64 * 100.0;
    (rate * 10.0).round() / 10.0
}
