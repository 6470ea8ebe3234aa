use uuid::Uuid;

use crate::{db::DbPool, error::AppResult, models::QuestProgress};

const POINTS_PER_ORDER: i32 = 10;

/// Bump the customer's gamification counters. Runs detached from order
/// creation; callers decide whether a failure matters.
pub async fn record_order_placed(pool: &DbPool, customer_id: Uuid) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO quest_progress (customer_id, orders_placed, total_points, updated_at)
        VALUES ($1, 1, $2, now())
        ON CONFLICT (customer_id) DO UPDATE
        SET orders_placed = quest_progress.orders_placed + 1,
            total_points = quest_progress.total_points + $2,
            updated_at = now()
        "#,
    )
    .bind(customer_id)
    .bind(POINTS_PER_ORDER)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn progress_for(pool: &DbPool, customer_id: Uuid) -> AppResult<Option<QuestProgress>> {
    let row = sqlx::query_as::<_, QuestProgress>(
        "SELECT customer_id, orders_placed, total_points, updated_at \
         FROM quest_progress WHERE customer_id = $1",
    )
    .bind(customer_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
