use crate::{
    dto::delivery::RiderList,
    error::AppResult,
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Riders not currently attached to a live order. The dispatcher filters
/// through this before calling assign; the order store itself does not
/// re-check eligibility.
pub async fn list_free_riders(state: &AppState) -> AppResult<ApiResponse<RiderList>> {
    let riders = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, role, created_at
        FROM users
        WHERE role = 'delivery'
          AND id NOT IN (
            SELECT delivery_partner_id FROM orders
            WHERE delivery_partner_id IS NOT NULL
              AND status NOT IN ('delivered', 'cancelled')
          )
        ORDER BY created_at
        "#,
    )
    .fetch_all(&state.pool)
    .await?;

    let meta = Meta::count(riders.len() as i64);
    Ok(ApiResponse::success("Ok", RiderList { riders }, Some(meta)))
}
